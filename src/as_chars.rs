/// The `AsChars` trait allows a type to be used as a key in a [`Trie`](crate::Trie).
///
/// It provides a method to walk the key one character at a time.
///
pub trait AsChars {
    /// Yields the characters of the key in order.
    fn as_chars(&self) -> impl Iterator<Item = char>;

    fn to_key_string(&self) -> String {
        self.as_chars().collect()
    }
}

impl AsChars for char {
    fn as_chars(&self) -> impl Iterator<Item = char> {
        Some(*self).into_iter()
    }
}

impl AsChars for str {
    fn as_chars(&self) -> impl Iterator<Item = char> {
        self.chars()
    }
}

impl AsChars for String {
    fn as_chars(&self) -> impl Iterator<Item = char> {
        self.as_str().chars()
    }
}

impl AsChars for [char] {
    fn as_chars(&self) -> impl Iterator<Item = char> {
        self.iter().copied()
    }
}

impl AsChars for Vec<char> {
    fn as_chars(&self) -> impl Iterator<Item = char> {
        self.iter().copied()
    }
}

impl<const N: usize> AsChars for [char; N] {
    fn as_chars(&self) -> impl Iterator<Item = char> {
        self.as_slice().iter().copied()
    }
}

impl<T: AsChars + ?Sized> AsChars for &T {
    fn as_chars(&self) -> impl Iterator<Item = char> {
        T::as_chars(*self)
    }
}
