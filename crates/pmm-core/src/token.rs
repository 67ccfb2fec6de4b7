//! Outcome tokens of a binary market.
//!
//! A binary market has exactly two outcome tokens whose prices sum to 1.
//! `Token` is a closed enum so the complement relation is total and
//! checked by the compiler rather than inferred from order contents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// One of the two complementary outcome tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    A,
    B,
}

impl Token {
    /// Fixed enumeration order used by every per-token pass.
    pub const ALL: [Token; 2] = [Token::A, Token::B];

    /// Returns the complementary token. `t.complement().complement() == t`.
    #[inline]
    pub const fn complement(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "TokenA"),
            Self::B => write!(f, "TokenB"),
        }
    }
}

/// One value per outcome token. A missing entry deserializes to `T::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct PerToken<T> {
    #[serde(default)]
    pub a: T,
    #[serde(default)]
    pub b: T,
}

impl<T> PerToken<T> {
    pub const fn new(a: T, b: T) -> Self {
        Self { a, b }
    }

    /// Build by evaluating `f` for each token in `Token::ALL` order.
    pub fn from_fn(mut f: impl FnMut(Token) -> T) -> Self {
        let a = f(Token::A);
        let b = f(Token::B);
        Self { a, b }
    }

    #[inline]
    pub fn get(&self, token: Token) -> &T {
        match token {
            Token::A => &self.a,
            Token::B => &self.b,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, token: Token) -> &mut T {
        match token {
            Token::A => &mut self.a,
            Token::B => &mut self.b,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Token, &T)> {
        [(Token::A, &self.a), (Token::B, &self.b)].into_iter()
    }
}

impl<T> Index<Token> for PerToken<T> {
    type Output = T;

    fn index(&self, token: Token) -> &Self::Output {
        self.get(token)
    }
}

impl<T> IndexMut<Token> for PerToken<T> {
    fn index_mut(&mut self, token: Token) -> &mut Self::Output {
        self.get_mut(token)
    }
}
