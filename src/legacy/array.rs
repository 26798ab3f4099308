//! Raw numeric arrays with an explicit byte order
//!
//! Arrays read from a legacy container keep their on-disk bytes and byte
//! order. [`NumericArray::to_native`] converts them to host order; the value
//! accessors decode according to whatever order the array is tagged with.

use crate::error::{Result, TplotError};

/// Byte order of stored elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    /// Byte order of the host
    pub const NATIVE: ByteOrder = if cfg!(target_endian = "big") {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };
}

/// Element type of a numeric array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    /// Pair of f32 (real, imaginary)
    Complex64,
    /// Pair of f64 (real, imaginary)
    Complex128,
}

impl ElementType {
    /// Size of one element in bytes
    pub fn size_bytes(&self) -> usize {
        match self {
            ElementType::U8 => 1,
            ElementType::I16 | ElementType::U16 => 2,
            ElementType::I32 | ElementType::U32 | ElementType::F32 => 4,
            ElementType::I64 | ElementType::U64 | ElementType::F64 | ElementType::Complex64 => 8,
            ElementType::Complex128 => 16,
        }
    }

    /// Size of the unit whose bytes get swapped (one complex component)
    fn swap_unit(&self) -> usize {
        match self {
            ElementType::Complex64 => 4,
            ElementType::Complex128 => 8,
            other => other.size_bytes(),
        }
    }

    pub fn is_integer(&self) -> bool {
        !matches!(
            self,
            ElementType::F32 | ElementType::F64 | ElementType::Complex64 | ElementType::Complex128
        )
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, ElementType::Complex64 | ElementType::Complex128)
    }
}

/// A typed, shaped block of raw element bytes
#[derive(Debug, Clone, PartialEq)]
pub struct NumericArray {
    element: ElementType,
    order: ByteOrder,
    /// Row-major shape (slowest dimension first)
    shape: Vec<usize>,
    bytes: Vec<u8>,
}

fn decode<const N: usize, T>(
    bytes: &[u8],
    order: ByteOrder,
    from_be: fn([u8; N]) -> T,
    from_le: fn([u8; N]) -> T,
) -> Vec<T> {
    bytes
        .chunks_exact(N)
        .map(|chunk| {
            let mut raw = [0u8; N];
            raw.copy_from_slice(chunk);
            match order {
                ByteOrder::Big => from_be(raw),
                ByteOrder::Little => from_le(raw),
            }
        })
        .collect()
}

impl NumericArray {
    /// Wrap raw bytes, checking they fill the shape exactly
    pub fn new(
        element: ElementType,
        order: ByteOrder,
        shape: Vec<usize>,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let count = shape
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(|| TplotError::Shape(format!("dimensions {:?} overflow", shape)))?;
        let expected = count.checked_mul(element.size_bytes()).ok_or_else(|| {
            TplotError::Shape(format!("{} {:?} elements overflow", count, element))
        })?;
        if expected != bytes.len() {
            return Err(TplotError::Shape(format!(
                "{} bytes do not hold {} {:?} elements",
                bytes.len(),
                count,
                element
            )));
        }
        Ok(Self {
            element,
            order,
            shape,
            bytes,
        })
    }

    /// Encode f64 values in the given byte order
    pub fn from_f64s(values: &[f64], order: ByteOrder, shape: Vec<usize>) -> Result<Self> {
        let bytes = values
            .iter()
            .flat_map(|v| match order {
                ByteOrder::Big => v.to_be_bytes(),
                ByteOrder::Little => v.to_le_bytes(),
            })
            .collect();
        Self::new(ElementType::F64, order, shape, bytes)
    }

    pub fn element(&self) -> ElementType {
        self.element
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.bytes.len() / self.element.size_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Stored bytes, in [`Self::order`]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Convert to host byte order
    pub fn to_native(mut self) -> Self {
        if self.order != ByteOrder::NATIVE {
            let unit = self.element.swap_unit();
            if unit > 1 {
                self.bytes
                    .chunks_exact_mut(unit)
                    .for_each(|chunk| chunk.reverse());
            }
            tracing::trace!(
                "Swapped {} {:?} elements from {:?} to native order",
                self.len(),
                self.element,
                self.order
            );
            self.order = ByteOrder::NATIVE;
        }
        self
    }

    /// Element values widened to f64
    pub fn to_f64_vec(&self) -> Result<Vec<f64>> {
        let b = &self.bytes;
        let o = self.order;
        Ok(match self.element {
            ElementType::U8 => b.iter().map(|v| f64::from(*v)).collect(),
            ElementType::I16 => decode(b, o, i16::from_be_bytes, i16::from_le_bytes)
                .into_iter()
                .map(f64::from)
                .collect(),
            ElementType::U16 => decode(b, o, u16::from_be_bytes, u16::from_le_bytes)
                .into_iter()
                .map(f64::from)
                .collect(),
            ElementType::I32 => decode(b, o, i32::from_be_bytes, i32::from_le_bytes)
                .into_iter()
                .map(f64::from)
                .collect(),
            ElementType::U32 => decode(b, o, u32::from_be_bytes, u32::from_le_bytes)
                .into_iter()
                .map(f64::from)
                .collect(),
            ElementType::I64 => decode(b, o, i64::from_be_bytes, i64::from_le_bytes)
                .into_iter()
                .map(|v| v as f64)
                .collect(),
            ElementType::U64 => decode(b, o, u64::from_be_bytes, u64::from_le_bytes)
                .into_iter()
                .map(|v| v as f64)
                .collect(),
            ElementType::F32 => decode(b, o, f32::from_be_bytes, f32::from_le_bytes)
                .into_iter()
                .map(f64::from)
                .collect(),
            ElementType::F64 => decode(b, o, f64::from_be_bytes, f64::from_le_bytes),
            ElementType::Complex64 | ElementType::Complex128 => {
                return Err(TplotError::UnsupportedLegacy(
                    "complex arrays cannot be used as real data".to_string(),
                ))
            }
        })
    }

    /// Element values as i64 (integer arrays only)
    pub fn to_i64_vec(&self) -> Result<Vec<i64>> {
        let b = &self.bytes;
        let o = self.order;
        Ok(match self.element {
            ElementType::U8 => b.iter().map(|v| i64::from(*v)).collect(),
            ElementType::I16 => decode(b, o, i16::from_be_bytes, i16::from_le_bytes)
                .into_iter()
                .map(i64::from)
                .collect(),
            ElementType::U16 => decode(b, o, u16::from_be_bytes, u16::from_le_bytes)
                .into_iter()
                .map(i64::from)
                .collect(),
            ElementType::I32 => decode(b, o, i32::from_be_bytes, i32::from_le_bytes)
                .into_iter()
                .map(i64::from)
                .collect(),
            ElementType::U32 => decode(b, o, u32::from_be_bytes, u32::from_le_bytes)
                .into_iter()
                .map(i64::from)
                .collect(),
            ElementType::I64 => decode(b, o, i64::from_be_bytes, i64::from_le_bytes),
            ElementType::U64 => decode(b, o, u64::from_be_bytes, u64::from_le_bytes)
                .into_iter()
                .map(|v| i64::try_from(v).unwrap_or(i64::MAX))
                .collect(),
            other => {
                return Err(TplotError::UnsupportedLegacy(format!(
                    "{:?} array is not an integer array",
                    other
                )))
            }
        })
    }
}
