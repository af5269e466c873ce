/// Byte-addressable input for the tokenizer.
pub trait Source {
    fn len(&self) -> usize;
    fn at(&self, index: usize) -> u8;

    /// The byte at `index`, or `None` past the end.
    fn get(&self, index: usize) -> Option<u8> {
        if index < self.len() {
            Some(self.at(index))
        } else {
            None
        }
    }
}

impl Source for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }
    fn at(&self, index: usize) -> u8 {
        self[index]
    }
}

impl Source for str {
    fn len(&self) -> usize {
        str::len(self)
    }
    fn at(&self, index: usize) -> u8 {
        self.as_bytes()[index]
    }
}
