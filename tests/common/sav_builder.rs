//! Writer for small uncompressed IDL SAVE files
//!
//! Produces just enough of the format for restore tests: scalars, numeric
//! and string arrays, and arrays of structures. All rows of a structure
//! array share the descriptor of the first row, as in IDL.

const REC_VARIABLE: i32 = 2;
const REC_END_MARKER: i32 = 6;
const REC_NOTICE: i32 = 19;

const FLAG_ARRAY: i32 = 0x04;
const FLAG_STRUCT_TAG: i32 = 0x24;

const ARRSTART_32: i32 = 8;
const STRUCTSTART: i32 = 9;
const VARSTART: i32 = 7;

const T_BYTE: i32 = 1;
const T_INT: i32 = 2;
const T_LONG: i32 = 3;
const T_FLOAT: i32 = 4;
const T_DOUBLE: i32 = 5;
const T_STRING: i32 = 7;
const T_STRUCT: i32 = 8;

/// A value to write
#[derive(Debug, Clone)]
pub enum Value {
    Long(i32),
    Double(f64),
    Str(String),
    /// Numeric array; `dims` in IDL order (fastest-varying first)
    Array {
        typecode: i32,
        dims: Vec<usize>,
        nbytes: usize,
        data: Vec<u8>,
    },
    Strings(Vec<String>),
    Struct(Vec<Row>),
}

/// One structure element
#[derive(Debug, Clone)]
pub struct Row {
    pub name: String,
    pub tags: Vec<(String, Value)>,
}

impl Row {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tags: Vec::new(),
        }
    }

    pub fn tag(mut self, name: &str, value: Value) -> Self {
        self.tags.push((name.to_string(), value));
        self
    }

    pub fn into_value(self) -> Value {
        Value::Struct(vec![self])
    }
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(s.to_string())
    }

    pub fn doubles(values: &[f64]) -> Self {
        Value::Array {
            typecode: T_DOUBLE,
            dims: vec![values.len()],
            nbytes: values.len() * 8,
            data: values.iter().flat_map(|v| v.to_be_bytes()).collect(),
        }
    }

    pub fn floats(values: &[f32]) -> Self {
        Value::Array {
            typecode: T_FLOAT,
            dims: vec![values.len()],
            nbytes: values.len() * 4,
            data: values.iter().flat_map(|v| v.to_be_bytes()).collect(),
        }
    }

    /// 16-bit integers, each written in the low half of a 32-bit word
    pub fn ints(values: &[i16]) -> Self {
        Value::Array {
            typecode: T_INT,
            dims: vec![values.len()],
            nbytes: values.len() * 2,
            data: values
                .iter()
                .flat_map(|v| {
                    let [hi, lo] = v.to_be_bytes();
                    [0, 0, hi, lo]
                })
                .collect(),
        }
    }

    pub fn bytes(values: &[u8]) -> Self {
        Value::Array {
            typecode: T_BYTE,
            dims: vec![values.len()],
            nbytes: values.len(),
            data: values.to_vec(),
        }
    }

    /// A (time, component) table written as an IDL `[ntimes, ncomponents]` array
    pub fn doubles_by_time(rows: &[Vec<f64>]) -> Self {
        let ntimes = rows.len();
        let ncomp = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(ntimes * ncomp * 8);
        for c in 0..ncomp {
            for row in rows {
                data.extend_from_slice(&row[c].to_be_bytes());
            }
        }
        Value::Array {
            typecode: T_DOUBLE,
            dims: vec![ntimes, ncomp],
            nbytes: ntimes * ncomp * 8,
            data,
        }
    }

    pub fn strings(values: &[&str]) -> Self {
        Value::Strings(values.iter().map(|s| s.to_string()).collect())
    }

    fn type_and_flags(&self) -> (i32, i32) {
        match self {
            Value::Long(_) => (T_LONG, 0),
            Value::Double(_) => (T_DOUBLE, 0),
            Value::Str(_) => (T_STRING, 0),
            Value::Array { typecode, .. } => (*typecode, FLAG_ARRAY),
            Value::Strings(_) => (T_STRING, FLAG_ARRAY),
            Value::Struct(_) => (T_STRUCT, FLAG_STRUCT_TAG),
        }
    }
}

/// Builds a complete file image
pub struct SavBuilder {
    out: Vec<u8>,
}

impl Default for SavBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SavBuilder {
    pub fn new() -> Self {
        Self {
            out: vec![b'S', b'R', 0x00, 0x04],
        }
    }

    pub fn notice(mut self, text: &str) -> Self {
        self.record(REC_NOTICE, |out| write_string(out, text));
        self
    }

    pub fn variable(mut self, name: &str, value: &Value) -> Self {
        self.record(REC_VARIABLE, |out| {
            write_string(out, name);
            let (typecode, flags) = value.type_and_flags();
            write_i32(out, typecode);
            write_i32(out, flags);
            write_descriptors(out, value);
            write_i32(out, VARSTART);
            write_data(out, value);
        });
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.record(REC_END_MARKER, |_| {});
        self.out
    }

    pub fn write_to(self, path: &std::path::Path) {
        std::fs::write(path, self.finish()).expect("write save file");
    }

    fn record(&mut self, rectype: i32, body: impl FnOnce(&mut Vec<u8>)) {
        write_i32(&mut self.out, rectype);
        let next_at = self.out.len();
        write_i32(&mut self.out, 0);
        write_i32(&mut self.out, 0);
        write_i32(&mut self.out, 0);
        body(&mut self.out);
        let next = self.out.len() as u32;
        self.out[next_at..next_at + 4].copy_from_slice(&next.to_be_bytes());
    }
}

fn write_i32(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn align(out: &mut Vec<u8>) {
    while out.len() % 4 != 0 {
        out.push(0);
    }
}

fn write_string(out: &mut Vec<u8>, s: &str) {
    write_i32(out, s.len() as i32);
    out.extend_from_slice(s.as_bytes());
    align(out);
}

fn write_string_data(out: &mut Vec<u8>, s: &str) {
    write_i32(out, s.len() as i32);
    if !s.is_empty() {
        write_i32(out, s.len() as i32);
        out.extend_from_slice(s.as_bytes());
        align(out);
    }
}

fn write_arraydesc(out: &mut Vec<u8>, nbytes: usize, dims: &[usize]) {
    let nelements: usize = dims.iter().product();
    for v in [ARRSTART_32, 0, nbytes as i32, nelements as i32, dims.len() as i32, 0, 0, 8] {
        write_i32(out, v);
    }
    for i in 0..8 {
        write_i32(out, dims.get(i).copied().unwrap_or(1) as i32);
    }
}

/// Array and structure descriptors that follow a type's flags
fn write_descriptors(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Array { dims, nbytes, .. } => write_arraydesc(out, *nbytes, dims),
        Value::Strings(values) => write_arraydesc(out, values.len(), &[values.len()]),
        Value::Struct(rows) => {
            write_arraydesc(out, 0, &[rows.len()]);
            write_structdesc(out, &rows[0]);
        }
        _ => {}
    }
}

fn write_structdesc(out: &mut Vec<u8>, row: &Row) {
    write_i32(out, STRUCTSTART);
    write_string(out, &row.name);
    write_i32(out, 0);
    write_i32(out, row.tags.len() as i32);
    write_i32(out, 0);
    for (_, value) in &row.tags {
        let (typecode, flags) = value.type_and_flags();
        write_i32(out, 0);
        write_i32(out, typecode);
        write_i32(out, flags);
    }
    for (name, _) in &row.tags {
        write_string(out, name);
    }
    for (_, value) in &row.tags {
        match value {
            Value::Array { dims, nbytes, .. } => write_arraydesc(out, *nbytes, dims),
            Value::Strings(values) => write_arraydesc(out, values.len(), &[values.len()]),
            Value::Struct(rows) => write_arraydesc(out, 0, &[rows.len()]),
            _ => {}
        }
    }
    for (_, value) in &row.tags {
        if let Value::Struct(rows) = value {
            write_structdesc(out, &rows[0]);
        }
    }
}

fn write_data(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Long(v) => write_i32(out, *v),
        Value::Double(v) => out.extend_from_slice(&v.to_be_bytes()),
        Value::Str(s) => write_string_data(out, s),
        Value::Array {
            typecode, data, ..
        } => {
            if *typecode == T_BYTE {
                write_i32(out, data.len() as i32);
            }
            out.extend_from_slice(data);
            align(out);
        }
        Value::Strings(values) => {
            for s in values {
                write_string_data(out, s);
            }
            align(out);
        }
        Value::Struct(rows) => {
            for row in rows {
                for (_, value) in &row.tags {
                    write_data(out, value);
                }
            }
        }
    }
}
