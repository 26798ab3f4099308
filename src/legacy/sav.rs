//! IDL SAVE container reader
//!
//! Reads the uncompressed IDL SAVE format into a generic [`SavValue`] tree.
//! Everything in the file is big-endian; numeric arrays keep their raw bytes
//! tagged [`ByteOrder::Big`] so the caller decides when to normalise them.
//!
//! # Layout
//!
//! ```text
//! "SR" 0x00 0x04
//! record*:  rectype:i32  nextrec:u32  nextrec_hi:u32  (4 bytes)  body
//! ```
//!
//! After each record the reader jumps to `nextrec`, so record types that are
//! not decoded are skipped cleanly. Strings and data blocks are padded to
//! 4-byte boundaries; 8- and 16-bit scalars occupy a full 32-bit word.

use std::collections::{BTreeMap, HashMap};

use super::array::{ByteOrder, ElementType, NumericArray};
use crate::error::{Result, TplotError};

const SIGNATURE: &[u8; 2] = b"SR";
const RECFMT_PLAIN: [u8; 2] = [0x00, 0x04];
const RECFMT_COMPRESSED: [u8; 2] = [0x00, 0x06];

const REC_START_MARKER: i32 = 0;
const REC_COMMON_VARIABLE: i32 = 1;
const REC_VARIABLE: i32 = 2;
const REC_SYSTEM_VARIABLE: i32 = 3;
const REC_END_MARKER: i32 = 6;
const REC_TIMESTAMP: i32 = 10;
const REC_COMPILED: i32 = 12;
const REC_IDENTIFICATION: i32 = 13;
const REC_VERSION: i32 = 14;
const REC_HEAP_HEADER: i32 = 15;
const REC_HEAP_DATA: i32 = 16;
const REC_PROMOTE64: i32 = 17;
const REC_NOTICE: i32 = 19;
const REC_DESCRIPTION: i32 = 20;

const VARFLAG_SYSTEM: i32 = 0x02;
const VARFLAG_ARRAY: i32 = 0x04;
const VARFLAG_STRUCT: i32 = 0x20;

const ARRSTART_32: i32 = 8;
const ARRSTART_64: i32 = 18;
const STRUCTSTART: i32 = 9;
const VARSTART: i32 = 7;

/// Deepest structure nesting accepted in a descriptor
const MAX_STRUCT_DEPTH: usize = 64;

/// IDL type codes
mod typecode {
    pub const UNDEFINED: i32 = 0;
    pub const BYTE: i32 = 1;
    pub const INT: i32 = 2;
    pub const LONG: i32 = 3;
    pub const FLOAT: i32 = 4;
    pub const DOUBLE: i32 = 5;
    pub const COMPLEX: i32 = 6;
    pub const STRING: i32 = 7;
    pub const STRUCT: i32 = 8;
    pub const DCOMPLEX: i32 = 9;
    pub const POINTER: i32 = 10;
    pub const OBJREF: i32 = 11;
    pub const UINT: i32 = 12;
    pub const ULONG: i32 = 13;
    pub const LONG64: i32 = 14;
    pub const ULONG64: i32 = 15;
}

/// A scalar read from the file
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    UInt(u64),
    Float(f64),
    Complex(f64, f64),
    Str(String),
}

/// A value in the save file
#[derive(Debug, Clone, PartialEq)]
pub enum SavValue {
    /// Variable saved as undefined
    Null,
    Scalar(Scalar),
    Numeric(NumericArray),
    Strings { shape: Vec<usize>, values: Vec<String> },
    Structs(StructArray),
}

impl SavValue {
    pub fn as_structs(&self) -> Option<&StructArray> {
        match self {
            SavValue::Structs(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<&NumericArray> {
        match self {
            SavValue::Numeric(n) => Some(n),
            _ => None,
        }
    }

    /// Short description for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            SavValue::Null => "undefined",
            SavValue::Scalar(Scalar::Str(_)) => "string scalar",
            SavValue::Scalar(_) => "numeric scalar",
            SavValue::Numeric(_) => "numeric array",
            SavValue::Strings { .. } => "string array",
            SavValue::Structs(_) => "structure",
        }
    }
}

/// An array of structures sharing one definition
#[derive(Debug, Clone, PartialEq)]
pub struct StructArray {
    /// Structure name (empty for anonymous structures)
    pub name: String,
    /// Tag (field) names in definition order
    pub tags: Vec<String>,
    /// Row-major shape
    pub shape: Vec<usize>,
    rows: Vec<Vec<SavValue>>,
}

impl StructArray {
    pub fn new(
        name: String,
        tags: Vec<String>,
        shape: Vec<usize>,
        rows: Vec<Vec<SavValue>>,
    ) -> Self {
        Self {
            name,
            tags,
            shape,
            rows,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<StructRow<'_>> {
        self.rows.get(index).map(|values| StructRow {
            tags: &self.tags,
            values,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = StructRow<'_>> {
        self.rows.iter().map(|values| StructRow {
            tags: &self.tags,
            values,
        })
    }
}

/// One element of a [`StructArray`]
#[derive(Debug, Clone, Copy)]
pub struct StructRow<'a> {
    tags: &'a [String],
    values: &'a [SavValue],
}

impl<'a> StructRow<'a> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn tags(&self) -> &'a [String] {
        self.tags
    }

    /// Field by position
    pub fn at(&self, index: usize) -> Option<&'a SavValue> {
        self.values.get(index)
    }

    /// Field by tag name, case-insensitive
    pub fn field(&self, name: &str) -> Option<&'a SavValue> {
        self.tags
            .iter()
            .position(|t| t.eq_ignore_ascii_case(name))
            .and_then(|i| self.values.get(i))
    }

    /// `(tag, value)` pairs in definition order
    pub fn fields(&self) -> impl Iterator<Item = (&'a str, &'a SavValue)> {
        self.tags.iter().map(String::as_str).zip(self.values.iter())
    }
}

/// Descriptive records found in the file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavInfo {
    pub format_version: Option<i32>,
    pub arch: Option<String>,
    pub os: Option<String>,
    pub release: Option<String>,
    pub date: Option<String>,
    pub user: Option<String>,
    pub host: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub idcode: Option<String>,
    pub notice: Option<String>,
    pub description: Option<String>,
}

/// Parsed save file
#[derive(Debug, Clone, Default)]
pub struct SavFile {
    /// Top-level variables keyed by lower-case name
    pub variables: BTreeMap<String, SavValue>,
    pub info: SavInfo,
}

impl SavFile {
    /// Parse a complete file image
    pub fn parse(data: &[u8]) -> Result<Self> {
        Reader::new(data).read_file()
    }

    /// Read and parse a file from disk
    pub fn read(path: &std::path::Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::parse(&data)
    }

    pub fn get(&self, name: &str) -> Option<&SavValue> {
        self.variables.get(&name.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone)]
struct ArrayDesc {
    nbytes: u64,
    nelements: u64,
    dims: Vec<u64>,
}

impl ArrayDesc {
    /// Row-major shape: IDL dimensions reversed
    fn shape(&self) -> Vec<usize> {
        if self.dims.len() > 1 {
            self.dims.iter().rev().map(|&d| d as usize).collect()
        } else {
            vec![self.nelements as usize]
        }
    }
}

#[derive(Debug, Clone)]
struct TagDesc {
    name: String,
    typecode: i32,
    array: bool,
    structure: bool,
}

#[derive(Debug, Clone)]
struct StructDesc {
    name: String,
    tags: Vec<TagDesc>,
    arrays: HashMap<String, ArrayDesc>,
    structs: HashMap<String, StructDesc>,
}

#[derive(Debug)]
struct TypeDesc {
    typecode: i32,
    array: Option<ArrayDesc>,
    structure: Option<StructDesc>,
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
    /// Structure definitions seen so far, for predefined references
    known_structs: HashMap<String, StructDesc>,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            known_structs: HashMap::new(),
        }
    }

    fn err(&self, message: impl Into<String>) -> TplotError {
        TplotError::legacy(self.pos as u64, message)
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| self.err(format!("unexpected end of file reading {} bytes", n)))?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut raw = [0u8; N];
        raw.copy_from_slice(self.read_bytes(N)?);
        Ok(raw)
    }

    fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_array()?))
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.read_array()?))
    }

    fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_be_bytes(self.read_array()?))
    }

    fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.read_array()?))
    }

    fn read_count(&mut self, what: &str) -> Result<usize> {
        let n = self.read_i32()?;
        usize::try_from(n).map_err(|_| self.err(format!("negative {} ({})", what, n)))
    }

    fn align_32(&mut self) {
        let rem = self.pos % 4;
        if rem != 0 {
            self.pos = (self.pos + 4 - rem).min(self.data.len());
        }
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.read_count("string length")?;
        if len == 0 {
            return Ok(String::new());
        }
        let bytes = self.read_bytes(len)?;
        self.align_32();
        Ok(latin1(bytes))
    }

    fn read_string_data(&mut self) -> Result<String> {
        let len = self.read_count("string length")?;
        if len == 0 {
            return Ok(String::new());
        }
        let len = self.read_count("string data length")?;
        let bytes = self.read_bytes(len)?;
        self.align_32();
        Ok(latin1(bytes))
    }

    fn read_file(mut self) -> Result<SavFile> {
        if self.read_bytes(2)? != SIGNATURE {
            return Err(TplotError::legacy(0, "not an IDL SAVE file (missing 'SR' signature)"));
        }
        match self.read_array::<2>()? {
            RECFMT_PLAIN => {}
            RECFMT_COMPRESSED => {
                return Err(TplotError::UnsupportedLegacy(
                    "compressed IDL SAVE files".to_string(),
                ))
            }
            other => return Err(self.err(format!("unknown record format {:?}", other))),
        }

        let mut file = SavFile::default();
        loop {
            let start = self.pos;
            let rectype = self.read_i32()?;
            let low = u64::from(self.read_u32()?);
            let high = u64::from(self.read_u32()?);
            let nextrec = (high << 32) | low;
            self.skip(4)?;

            match rectype {
                REC_END_MARKER => break,
                REC_VARIABLE => {
                    let name = self.read_string()?;
                    let value = self.read_variable_body(nextrec)?;
                    tracing::debug!("IDL SAVE variable '{}': {}", name, value.kind());
                    file.variables.insert(name.to_ascii_lowercase(), value);
                }
                REC_TIMESTAMP => {
                    self.skip(4 * 256)?;
                    file.info.date = Some(self.read_string()?);
                    file.info.user = Some(self.read_string()?);
                    file.info.host = Some(self.read_string()?);
                }
                REC_VERSION => {
                    file.info.format_version = Some(self.read_i32()?);
                    file.info.arch = Some(self.read_string()?);
                    file.info.os = Some(self.read_string()?);
                    file.info.release = Some(self.read_string()?);
                }
                REC_IDENTIFICATION => {
                    file.info.author = Some(self.read_string()?);
                    file.info.title = Some(self.read_string()?);
                    file.info.idcode = Some(self.read_string()?);
                }
                REC_NOTICE => file.info.notice = Some(self.read_string()?),
                REC_DESCRIPTION => file.info.description = Some(self.read_string_data()?),
                REC_START_MARKER | REC_COMMON_VARIABLE | REC_SYSTEM_VARIABLE | REC_COMPILED
                | REC_HEAP_HEADER | REC_HEAP_DATA | REC_PROMOTE64 => {
                    tracing::debug!("Skipping IDL SAVE record type {} at {}", rectype, start);
                }
                other => {
                    return Err(TplotError::legacy(
                        start as u64,
                        format!("unknown record type {}", other),
                    ))
                }
            }

            let next = usize::try_from(nextrec).unwrap_or(usize::MAX);
            if next <= start || next > self.data.len() {
                return Err(TplotError::legacy(
                    start as u64,
                    format!("record points to invalid next offset {}", nextrec),
                ));
            }
            self.pos = next;
        }
        Ok(file)
    }

    fn read_variable_body(&mut self, nextrec: u64) -> Result<SavValue> {
        let desc = self.read_typedesc()?;
        if desc.typecode == typecode::UNDEFINED {
            if nextrec == self.pos as u64 {
                return Ok(SavValue::Null);
            }
            return Err(self.err("unexpected type code 0"));
        }
        let varstart = self.read_i32()?;
        if varstart != VARSTART {
            return Err(self.err(format!("VARSTART is {} instead of 7", varstart)));
        }
        match (&desc.structure, &desc.array) {
            (Some(sdesc), Some(adesc)) => self.read_structure(adesc, sdesc, 0),
            (None, Some(adesc)) => self.read_array_data(desc.typecode, adesc),
            _ => self.read_scalar(desc.typecode).map(SavValue::Scalar),
        }
    }

    fn read_typedesc(&mut self) -> Result<TypeDesc> {
        let typecode = self.read_i32()?;
        let varflags = self.read_i32()?;
        if varflags & VARFLAG_SYSTEM != 0 {
            return Err(TplotError::UnsupportedLegacy(
                "IDL system variables".to_string(),
            ));
        }
        let is_array = varflags & VARFLAG_ARRAY != 0;
        let is_struct = varflags & VARFLAG_STRUCT != 0;

        let (array, structure) = if is_struct {
            let array = self.read_arraydesc()?;
            let structure = self.read_structdesc(0)?;
            (Some(array), Some(structure))
        } else if is_array {
            (Some(self.read_arraydesc()?), None)
        } else {
            (None, None)
        };
        Ok(TypeDesc {
            typecode,
            array,
            structure,
        })
    }

    fn read_arraydesc(&mut self) -> Result<ArrayDesc> {
        let arrstart = self.read_i32()?;
        match arrstart {
            ARRSTART_32 => {
                self.skip(4)?;
                let nbytes = self.read_count("array byte count")? as u64;
                let nelements = self.read_count("array element count")? as u64;
                let ndims = self.read_count("array rank")?;
                self.skip(8)?;
                let nmax = self.read_count("array dimension slots")?;
                let mut dims = Vec::with_capacity(nmax.min(8));
                for _ in 0..nmax {
                    dims.push(self.read_count("array dimension")? as u64);
                }
                dims.truncate(ndims);
                Ok(ArrayDesc {
                    nbytes,
                    nelements,
                    dims,
                })
            }
            ARRSTART_64 => {
                self.skip(8)?;
                let nbytes = self.read_u64()?;
                let nelements = self.read_u64()?;
                let ndims = self.read_count("array rank")?;
                self.skip(8)?;
                let mut dims = Vec::with_capacity(8);
                for _ in 0..8 {
                    if self.read_i32()? != 0 {
                        return Err(self.err("expected a zero in 64-bit array descriptor"));
                    }
                    dims.push(self.read_count("array dimension")? as u64);
                }
                dims.truncate(ndims);
                Ok(ArrayDesc {
                    nbytes,
                    nelements,
                    dims,
                })
            }
            other => Err(self.err(format!("unknown ARRSTART {}", other))),
        }
    }

    fn read_tagdesc(&mut self) -> Result<TagDesc> {
        let offset = self.read_i32()?;
        if offset == -1 {
            self.read_u64()?;
        }
        let typecode = self.read_i32()?;
        let flags = self.read_i32()?;
        Ok(TagDesc {
            name: String::new(),
            typecode,
            array: flags & VARFLAG_ARRAY != 0,
            structure: flags & VARFLAG_STRUCT != 0,
        })
    }

    fn read_structdesc(&mut self, depth: usize) -> Result<StructDesc> {
        if depth > MAX_STRUCT_DEPTH {
            return Err(self.err("structure nesting too deep"));
        }
        let structstart = self.read_i32()?;
        if structstart != STRUCTSTART {
            return Err(self.err(format!("STRUCTSTART is {} instead of 9", structstart)));
        }
        let name = self.read_string()?;
        let predef = self.read_i32()?;
        let ntags = self.read_count("tag count")?;
        let _nbytes = self.read_i32()?;

        let is_predefined = predef & 1 != 0;
        let inherits = predef & 2 != 0;
        let is_super = predef & 4 != 0;

        if is_predefined {
            return self.known_structs.get(&name).cloned().ok_or_else(|| {
                self.err(format!("predefined structure '{}' was never defined", name))
            });
        }

        let mut tags = Vec::with_capacity(ntags.min(1024));
        for _ in 0..ntags {
            tags.push(self.read_tagdesc()?);
        }
        for tag in &mut tags {
            tag.name = self.read_string()?;
        }
        let mut arrays = HashMap::new();
        for tag in tags.iter().filter(|t| t.array) {
            arrays.insert(tag.name.clone(), self.read_arraydesc()?);
        }
        let mut structs = HashMap::new();
        for tag in tags.iter().filter(|t| t.structure) {
            structs.insert(tag.name.clone(), self.read_structdesc(depth + 1)?);
        }

        if inherits || is_super {
            let _classname = self.read_string()?;
            let nsup = self.read_count("superclass count")?;
            for _ in 0..nsup {
                self.read_string()?;
            }
            for _ in 0..nsup {
                self.read_structdesc(depth + 1)?;
            }
        }

        let desc = StructDesc {
            name: name.clone(),
            tags,
            arrays,
            structs,
        };
        self.known_structs.insert(name, desc.clone());
        Ok(desc)
    }

    fn read_structure(
        &mut self,
        adesc: &ArrayDesc,
        sdesc: &StructDesc,
        depth: usize,
    ) -> Result<SavValue> {
        if depth > MAX_STRUCT_DEPTH {
            return Err(self.err("structure nesting too deep"));
        }
        let nrows = adesc.nelements as usize;
        let mut rows = Vec::with_capacity(nrows.min(4096));
        for _ in 0..nrows {
            let mut row = Vec::with_capacity(sdesc.tags.len());
            for tag in &sdesc.tags {
                let value = if tag.structure {
                    let (Some(inner_a), Some(inner_s)) =
                        (sdesc.arrays.get(&tag.name), sdesc.structs.get(&tag.name))
                    else {
                        return Err(self.err(format!("missing descriptor for tag '{}'", tag.name)));
                    };
                    self.read_structure(inner_a, inner_s, depth + 1)?
                } else if tag.array {
                    let inner_a = sdesc.arrays.get(&tag.name).ok_or_else(|| {
                        self.err(format!("missing array descriptor for tag '{}'", tag.name))
                    })?;
                    self.read_array_data(tag.typecode, inner_a)?
                } else {
                    SavValue::Scalar(self.read_scalar(tag.typecode)?)
                };
                row.push(value);
            }
            rows.push(row);
        }
        Ok(SavValue::Structs(StructArray::new(
            sdesc.name.clone(),
            sdesc.tags.iter().map(|t| t.name.clone()).collect(),
            adesc.shape(),
            rows,
        )))
    }

    fn read_scalar(&mut self, code: i32) -> Result<Scalar> {
        Ok(match code {
            typecode::BYTE => {
                if self.read_i32()? != 1 {
                    return Err(self.err("byte scalar not preceded by a count of 1"));
                }
                let word = self.read_array::<4>()?;
                Scalar::Int(i64::from(word[0]))
            }
            typecode::INT => {
                let word = self.read_array::<4>()?;
                Scalar::Int(i64::from(i16::from_be_bytes([word[2], word[3]])))
            }
            typecode::UINT => {
                let word = self.read_array::<4>()?;
                Scalar::Int(i64::from(u16::from_be_bytes([word[2], word[3]])))
            }
            typecode::LONG => Scalar::Int(i64::from(self.read_i32()?)),
            typecode::ULONG => Scalar::UInt(u64::from(self.read_u32()?)),
            typecode::LONG64 => Scalar::Int(self.read_i64()?),
            typecode::ULONG64 => Scalar::UInt(self.read_u64()?),
            typecode::FLOAT => Scalar::Float(f64::from(self.read_f32()?)),
            typecode::DOUBLE => Scalar::Float(self.read_f64()?),
            typecode::COMPLEX => {
                let re = self.read_f32()?;
                let im = self.read_f32()?;
                Scalar::Complex(f64::from(re), f64::from(im))
            }
            typecode::DCOMPLEX => {
                let re = self.read_f64()?;
                let im = self.read_f64()?;
                Scalar::Complex(re, im)
            }
            typecode::STRING => Scalar::Str(self.read_string_data()?),
            typecode::POINTER | typecode::OBJREF => {
                return Err(TplotError::UnsupportedLegacy(
                    "IDL heap pointers and object references".to_string(),
                ))
            }
            typecode::STRUCT => return Err(self.err("structure stored as a scalar")),
            other => return Err(self.err(format!("unknown type code {}", other))),
        })
    }

    fn read_array_data(&mut self, code: i32, adesc: &ArrayDesc) -> Result<SavValue> {
        let shape = adesc.shape();
        let nbytes = usize::try_from(adesc.nbytes)
            .map_err(|_| self.err("array byte count does not fit in memory"))?;

        let element = match code {
            typecode::BYTE => Some(ElementType::U8),
            typecode::LONG => Some(ElementType::I32),
            typecode::FLOAT => Some(ElementType::F32),
            typecode::DOUBLE => Some(ElementType::F64),
            typecode::COMPLEX => Some(ElementType::Complex64),
            typecode::DCOMPLEX => Some(ElementType::Complex128),
            typecode::ULONG => Some(ElementType::U32),
            typecode::LONG64 => Some(ElementType::I64),
            typecode::ULONG64 => Some(ElementType::U64),
            _ => None,
        };

        let value = if let Some(element) = element {
            if code == typecode::BYTE {
                let declared = self.read_i32()?;
                if declared as i64 != adesc.nbytes as i64 {
                    tracing::warn!(
                        "Byte array declares {} bytes, descriptor says {}",
                        declared,
                        adesc.nbytes
                    );
                }
            }
            let bytes = self.read_bytes(nbytes)?.to_vec();
            SavValue::Numeric(self.numeric(element, shape, bytes)?)
        } else {
            match code {
                typecode::INT | typecode::UINT => {
                    // 16-bit elements are stored in the low half of 32-bit words
                    let raw = self.read_bytes(nbytes.saturating_mul(2))?;
                    let bytes = raw.chunks_exact(4).flat_map(|w| [w[2], w[3]]).collect();
                    let element = if code == typecode::INT {
                        ElementType::I16
                    } else {
                        ElementType::U16
                    };
                    SavValue::Numeric(self.numeric(element, shape, bytes)?)
                }
                typecode::STRING => {
                    let n = adesc.nelements as usize;
                    let mut values = Vec::with_capacity(n.min(4096));
                    for _ in 0..n {
                        values.push(self.read_string_data()?);
                    }
                    SavValue::Strings { shape, values }
                }
                typecode::POINTER | typecode::OBJREF => {
                    return Err(TplotError::UnsupportedLegacy(
                        "IDL heap pointers and object references".to_string(),
                    ))
                }
                other => return Err(self.err(format!("unsupported array type code {}", other))),
            }
        };
        self.align_32();
        Ok(value)
    }

    fn numeric(
        &self,
        element: ElementType,
        shape: Vec<usize>,
        bytes: Vec<u8>,
    ) -> Result<NumericArray> {
        NumericArray::new(element, ByteOrder::Big, shape, bytes)
            .map_err(|e| self.err(format!("array data does not match descriptor: {}", e)))
    }
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
