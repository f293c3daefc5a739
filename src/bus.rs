use std::fmt;

pub const MEMORY_SIZE: usize = 0x10000;

#[derive(Debug, PartialEq)]
pub enum ImageError {
    Empty,
    TooLarge(usize),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Empty => write!(f, "Memory image is empty"),
            ImageError::TooLarge(len) => write!(
                f,
                "Memory image is {} bytes, larger than the {} byte address space",
                len, MEMORY_SIZE
            ),
        }
    }
}

impl std::error::Error for ImageError {}

/// Flat 64KB address space. No mirroring, no memory-mapped devices.
#[derive(Clone)]
pub struct Bus {
    ram: Box<[u8; MEMORY_SIZE]>,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    pub fn new() -> Self {
        Bus {
            ram: Box::new([0; MEMORY_SIZE]),
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    pub fn write(&mut self, addr: u16, val: u8) {
        self.ram[addr as usize] = val;
    }

    /// Little-endian word read, both bytes taken from `addr` and `addr + 1`.
    pub fn read_u16(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Zero all memory.
    pub fn clear(&mut self) {
        self.ram.fill(0);
    }

    /// Copy `bytes` starting at `start`, wrapping at the top of memory.
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        for (i, b) in bytes.iter().enumerate() {
            self.write(start.wrapping_add(i as u16), *b);
        }
    }

    /// Load a raw memory image verbatim at offset 0. Anything past the end of
    /// a short image is zeroed.
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), ImageError> {
        if image.is_empty() {
            return Err(ImageError::Empty);
        }
        if image.len() > MEMORY_SIZE {
            return Err(ImageError::TooLarge(image.len()));
        }
        self.clear();
        self.ram[..image.len()].copy_from_slice(image);
        if image.len() < MEMORY_SIZE {
            log::warn!(
                "Image is {} bytes; remaining {} bytes zero-filled",
                image.len(),
                MEMORY_SIZE - image.len()
            );
        }
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.ram[..]
    }
}
