//! The fixed table of typed array element kinds.

use bkit_common::{Result, error::Error};

/// Numeric element kind of a typed array, identified on the wire by a one-byte tag.
///
/// | tag | kind | width |
/// |---|---|---|
/// | `0x01` | `I8` | 1 |
/// | `0x02` | `U8` | 1 |
/// | `0x03` | `U8Clamped` | 1 |
/// | `0x04` | `I16` | 2 |
/// | `0x05` | `U16` | 2 |
/// | `0x06` | `I32` | 4 |
/// | `0x07` | `U32` | 4 |
/// | `0x08` | `F32` | 4 |
/// | `0x09` | `F64` | 8 |
/// | `0x0a` | `I64` | 8 |
/// | `0x0b` | `U64` | 8 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementKind {
    I8 = 0x01,
    U8 = 0x02,
    /// Unsigned bytes whose producer clamps values to `0..=255`; stored like `U8`.
    U8Clamped = 0x03,
    I16 = 0x04,
    U16 = 0x05,
    I32 = 0x06,
    U32 = 0x07,
    F32 = 0x08,
    F64 = 0x09,
    I64 = 0x0a,
    U64 = 0x0b,
}

impl ElementKind {
    pub const ALL: [ElementKind; 11] = [
        ElementKind::I8,
        ElementKind::U8,
        ElementKind::U8Clamped,
        ElementKind::I16,
        ElementKind::U16,
        ElementKind::I32,
        ElementKind::U32,
        ElementKind::F32,
        ElementKind::F64,
        ElementKind::I64,
        ElementKind::U64,
    ];

    pub fn from_tag(tag: u8) -> Result<ElementKind> {
        use ElementKind::*;
        Ok(match tag {
            0x01 => I8,
            0x02 => U8,
            0x03 => U8Clamped,
            0x04 => I16,
            0x05 => U16,
            0x06 => I32,
            0x07 => U32,
            0x08 => F32,
            0x09 => F64,
            0x0a => I64,
            0x0b => U64,
            _ => return Err(Error::invalid_tag(tag)),
        })
    }

    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Element width in bytes, which is also the alignment a view of this kind needs.
    #[inline]
    pub fn width(self) -> usize {
        use ElementKind::*;
        match self {
            I8 | U8 | U8Clamped => 1,
            I16 | U16 => 2,
            I32 | U32 | F32 => 4,
            F64 | I64 | U64 => 8,
        }
    }

    /// Whether values of this kind can be viewed as the Rust element type of `other`.
    #[inline]
    pub fn is_compatible(self, other: ElementKind) -> bool {
        self == other
            || matches!(
                (self, other),
                (ElementKind::U8, ElementKind::U8Clamped) | (ElementKind::U8Clamped, ElementKind::U8)
            )
    }
}

/// A Rust numeric type that can be viewed in place as a typed array element.
pub trait Element: bytemuck::Pod {
    const KIND: ElementKind;
}

macro_rules! impl_element {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const KIND: ElementKind = ElementKind::$kind;
            }
        )*
    };
}

impl_element!(
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    f32 => F32,
    f64 => F64,
    i64 => I64,
    u64 => U64,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_table_is_consistent() {
        for kind in ElementKind::ALL {
            assert_eq!(ElementKind::from_tag(kind.tag()).unwrap(), kind);
        }
        assert_eq!(ElementKind::F64.width(), std::mem::size_of::<f64>());
        assert_eq!(ElementKind::U16.width(), 2);
        assert_eq!(<i64 as Element>::KIND.width(), 8);
    }

    #[test]
    fn test_unknown_tags() {
        for tag in [0x00u8, 0x0c, 0x80, 0xff] {
            assert!(ElementKind::from_tag(tag).is_err());
        }
    }

    #[test]
    fn test_clamped_compatibility() {
        assert!(ElementKind::U8.is_compatible(ElementKind::U8Clamped));
        assert!(!ElementKind::I8.is_compatible(ElementKind::U8));
        assert!(ElementKind::F32.is_compatible(ElementKind::F32));
    }
}
