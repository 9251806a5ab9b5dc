//! Token and alphabet types.

use std::fmt::{self, Display};

/// A single tile value on the board.
///
/// Tokens carry no identity beyond their value: two tokens with the same index
/// are interchangeable. The index refers to a symbol in an [`Alphabet`].
///
/// # Examples
///
/// ```
/// use gemfall_core::Token;
///
/// let token = Token::new(2);
/// assert_eq!(token.index(), 2);
/// assert_eq!(token.letter(), 'C');
/// assert_eq!(Token::from_letter('C'), Some(token));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(u8);

impl Token {
    /// Largest number of distinct tokens that can be named in the text grid format.
    pub const MAX_KINDS: usize = 26;

    /// Creates a token from its alphabet index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`Token::MAX_KINDS`].
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!((index as usize) < Self::MAX_KINDS, "token index out of range");
        Self(index)
    }

    /// Returns the alphabet index of this token.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the letter used for this token in the text grid format (`A` for index 0).
    #[must_use]
    pub const fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    /// Parses a token from its grid letter. Lowercase letters are accepted.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        upper
            .is_ascii_uppercase()
            .then(|| Self(upper as u8 - b'A'))
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Errors returned when building an [`Alphabet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AlphabetError {
    /// Fewer than [`Alphabet::MIN_LEN`] symbols were supplied.
    #[display("alphabet needs at least {} symbols, got {len}", Alphabet::MIN_LEN)]
    TooFew {
        /// Number of symbols supplied.
        len: usize,
    },
    /// More symbols than tokens can represent.
    #[display("alphabet supports at most {} symbols, got {len}", Token::MAX_KINDS)]
    TooMany {
        /// Number of symbols supplied.
        len: usize,
    },
    /// The same symbol appears twice.
    #[display("duplicate alphabet symbol {symbol:?}")]
    Duplicate {
        /// The repeated symbol.
        symbol: char,
    },
}

/// The finite set of symbols tokens are drawn from.
///
/// Each token index maps to one display symbol. The engine itself only ever
/// compares token indices; symbols exist for the presentation layer.
///
/// # Examples
///
/// ```
/// use gemfall_core::{Alphabet, Token};
///
/// let alphabet = Alphabet::new(['x', 'y', 'z'])?;
/// assert_eq!(alphabet.len(), 3);
/// assert_eq!(alphabet.symbol(Token::new(1)), 'y');
/// assert!(!alphabet.contains(Token::new(3)));
/// # Ok::<(), gemfall_core::AlphabetError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Smallest allowed alphabet size.
    pub const MIN_LEN: usize = 3;

    /// Symbols of the reference six-token configuration.
    pub const REFERENCE_SYMBOLS: [char; 6] = ['🔴', '🔵', '🟢', '🟡', '🟣', '🧡'];

    /// Creates an alphabet from distinct symbols.
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError`] if there are fewer than [`Alphabet::MIN_LEN`]
    /// or more than [`Token::MAX_KINDS`] symbols, or if a symbol repeats.
    pub fn new<I>(symbols: I) -> Result<Self, AlphabetError>
    where
        I: IntoIterator<Item = char>,
    {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.len() < Self::MIN_LEN {
            return Err(AlphabetError::TooFew { len: symbols.len() });
        }
        if symbols.len() > Token::MAX_KINDS {
            return Err(AlphabetError::TooMany { len: symbols.len() });
        }
        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(AlphabetError::Duplicate { symbol: *symbol });
            }
        }
        Ok(Self { symbols })
    }

    /// Returns the reference six-symbol alphabet.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            symbols: Self::REFERENCE_SYMBOLS.to_vec(),
        }
    }

    /// Returns an alphabet of `len` plain letters (`A`, `B`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`AlphabetError`] if `len` is outside the supported range.
    #[expect(clippy::cast_possible_truncation)]
    pub fn letters(len: usize) -> Result<Self, AlphabetError> {
        if len > Token::MAX_KINDS {
            return Err(AlphabetError::TooMany { len });
        }
        Self::new((0..len).map(|i| Token::new(i as u8).letter()))
    }

    /// Returns the number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns `true` if the alphabet has no symbols, which a validated alphabet never does.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Returns the token at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for this alphabet.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn token(&self, index: usize) -> Token {
        assert!(index < self.len(), "token index {index} out of range");
        Token::new(index as u8)
    }

    /// Returns `true` if `token` belongs to this alphabet.
    #[must_use]
    pub fn contains(&self, token: Token) -> bool {
        usize::from(token.index()) < self.len()
    }

    /// Returns the display symbol of `token`.
    ///
    /// # Panics
    ///
    /// Panics if the token does not belong to this alphabet.
    #[must_use]
    pub fn symbol(&self, token: Token) -> char {
        self.symbols[usize::from(token.index())]
    }

    /// Returns all display symbols in token order.
    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Iterates over every token of this alphabet.
    pub fn tokens(&self) -> impl ExactSizeIterator<Item = Token> + '_ {
        (0..self.len()).map(|i| self.token(i))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::reference()
    }
}
