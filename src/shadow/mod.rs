//! This module contains the shadow-value memory model used to represent the
//! state of the monitored program.
//!
//! A [`ShadowValue`] describes one addressable unit of monitored state. Values
//! of composite kind (pointers, arrays and structs) refer to a contiguous run
//! of further shadow values that is owned by a [`heap::ShadowHeap`]. Loads and
//! stores in the monitored program do not have to line up with the elements of
//! such a run, so reads and writes work at byte granularity and may span
//! several elements.
//!
//! # Raw Storage
//!
//! Every shadow value has eight bytes of raw storage holding the native
//! little-endian bit pattern of its kind: two's complement for integers, the
//! IEEE-754 pattern for floats, and the region handle for composites. Byte
//! level access therefore observes the same bytes the monitored program would
//! have seen in memory.

pub mod heap;

use std::fmt::{Display, Formatter};

use tracing::trace;

use crate::{
    constant::{EXTENDED_FLOAT_SIZE_BYTES, POINTER_SIZE_BYTES, RAW_VALUE_BYTES},
    error::memory::{Error, Result},
};

/// The scope in which a monitored value lives.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Scope {
    Global,
    Local,
    Register,
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Scope::Global => "GLOBAL  ",
            Scope::Local => "LOCAL   ",
            Scope::Register => "REGISTER",
        };
        write!(f, "{name}")
    }
}

/// The type of a monitored value, as far as the shadow memory is concerned.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum ValueKind {
    Pointer,
    Array,
    Struct,
    Int1,
    Int8,
    Int16,
    Int32,
    Int64,
    Flp32,
    Flp64,
    /// The x87 80-bit extended float. Only the low-order eight bytes of its
    /// representation are retained.
    Flp80X86,
    Void,
}

impl ValueKind {
    /// Gets the number of bytes a value of this kind occupies in the memory of
    /// the monitored program.
    #[must_use]
    pub fn size(self) -> usize {
        match self {
            Self::Pointer | Self::Array | Self::Struct => POINTER_SIZE_BYTES,
            Self::Int1 | Self::Int8 => 1,
            Self::Int16 => 2,
            Self::Int32 | Self::Flp32 => 4,
            Self::Int64 | Self::Flp64 => 8,
            Self::Flp80X86 => EXTENDED_FLOAT_SIZE_BYTES,
            Self::Void => 0,
        }
    }

    /// Checks if values of this kind refer to a run of shadow values.
    #[must_use]
    pub fn is_composite(self) -> bool {
        matches!(self, Self::Pointer | Self::Array | Self::Struct)
    }

    /// Checks if values of this kind are integers.
    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int1 | Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64
        )
    }

    /// Checks if values of this kind are floating-point numbers.
    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(self, Self::Flp32 | Self::Flp64 | Self::Flp80X86)
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Pointer => "PTR",
            Self::Array => "ARRAY",
            Self::Struct => "STRUCT",
            Self::Int1 => "INT1",
            Self::Int8 => "INT8",
            Self::Int16 => "INT16",
            Self::Int32 => "INT32",
            Self::Int64 => "INT64",
            Self::Flp32 => "FLP32",
            Self::Flp64 => "FLP64",
            Self::Flp80X86 => "FLP80X86",
            Self::Void => "VOID",
        };
        write!(f, "{name}")
    }
}

/// A handle to a run of shadow values owned by a [`heap::ShadowHeap`].
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RegionId(u64);

impl RegionId {
    /// Wraps the raw handle `id`.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Gets the raw handle.
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

impl Display for RegionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// The raw storage of a shadow value.
///
/// Which interpretation applies is decided by the [`ValueKind`] of the owning
/// [`ShadowValue`].
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct RawValue {
    bits: u64,
}

impl RawValue {
    /// Stores the two's complement pattern of `value`.
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // Reinterpretation is intended
    pub fn from_int(value: i64) -> Self {
        let bits = value as u64;
        Self { bits }
    }

    /// Stores the single-precision pattern of `value` in the low four bytes.
    #[must_use]
    pub fn from_f32(value: f32) -> Self {
        let bits = u64::from(value.to_bits());
        Self { bits }
    }

    /// Stores the double-precision pattern of `value`.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        let bits = value.to_bits();
        Self { bits }
    }

    /// Stores the handle of `region`.
    #[must_use]
    pub fn from_region(region: RegionId) -> Self {
        let bits = region.id();
        Self { bits }
    }

    /// Constructs the raw value from its little-endian `bytes`.
    #[must_use]
    pub fn from_le_bytes(bytes: [u8; RAW_VALUE_BYTES]) -> Self {
        let bits = u64::from_le_bytes(bytes);
        Self { bits }
    }

    /// Gets the raw bit pattern.
    #[must_use]
    pub fn bits(self) -> u64 {
        self.bits
    }

    /// Gets the little-endian bytes of the raw value.
    #[must_use]
    pub fn to_le_bytes(self) -> [u8; RAW_VALUE_BYTES] {
        self.bits.to_le_bytes()
    }

    /// Interprets the raw value as a 64-bit signed integer.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)] // Reinterpretation is intended
    pub fn as_int(self) -> i64 {
        self.bits as i64
    }
}

/// The shadow of one addressable unit of monitored program state.
///
/// Shadow values are created when the monitored program first produces a
/// value and are then mutated in place by every later store to the same
/// location. They are never freed individually; a value inside a run lives as
/// long as the [`heap::ShadowHeap`] region that owns it.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowValue {
    kind:         ValueKind,
    scope:        Scope,
    raw:          RawValue,
    size:         usize,
    offset:       usize,
    bit_offset:   u8,
    index:        usize,
    first_byte:   usize,
    length:       usize,
    line_number:  u64,
    value_offset: i64,
}

impl ShadowValue {
    /// Constructs a new shadow value of `kind` in `scope` holding `raw`.
    ///
    /// Its size is that of `kind`, and every positional attribute is zero.
    #[must_use]
    pub fn new(scope: Scope, kind: ValueKind, raw: RawValue) -> Self {
        let size = kind.size();
        Self {
            kind,
            scope,
            raw,
            size,
            offset: 0,
            bit_offset: 0,
            index: 0,
            first_byte: 0,
            length: 0,
            line_number: 0,
            value_offset: 0,
        }
    }

    /// Constructs an integer shadow value of `kind` holding `value`.
    #[must_use]
    pub fn int(scope: Scope, kind: ValueKind, value: i64) -> Self {
        Self::new(scope, kind, RawValue::from_int(value))
    }

    /// Constructs a single-precision shadow value holding `value`.
    #[must_use]
    pub fn flp32(scope: Scope, value: f32) -> Self {
        Self::new(scope, ValueKind::Flp32, RawValue::from_f32(value))
    }

    /// Constructs a double-precision shadow value holding `value`.
    #[must_use]
    pub fn flp64(scope: Scope, value: f64) -> Self {
        Self::new(scope, ValueKind::Flp64, RawValue::from_f64(value))
    }

    /// Constructs a pointer to the element at `index` of `region`, where the
    /// region holds `length` elements.
    #[must_use]
    pub fn pointer(scope: Scope, region: RegionId, index: usize, length: usize) -> Self {
        let mut value = Self::new(scope, ValueKind::Pointer, RawValue::from_region(region));
        value.index = index;
        value.length = length;
        value
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: ValueKind) {
        self.kind = kind;
    }

    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn set_scope(&mut self, scope: Scope) {
        self.scope = scope;
    }

    #[must_use]
    pub fn raw(&self) -> RawValue {
        self.raw
    }

    pub fn set_raw(&mut self, raw: RawValue) {
        self.raw = raw;
    }

    /// Gets the declared size of the value in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Gets the byte offset of the current access into this value.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Gets the bit position of a one-bit integer within its byte.
    #[must_use]
    pub fn bit_offset(&self) -> u8 {
        self.bit_offset
    }

    pub fn set_bit_offset(&mut self, bit_offset: u8) {
        self.bit_offset = bit_offset;
    }

    /// Gets the position of this value within its owning run, or for
    /// composites the position in the referenced run at which they point.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    #[must_use]
    pub fn first_byte(&self) -> usize {
        self.first_byte
    }

    pub fn set_first_byte(&mut self, first_byte: usize) {
        self.first_byte = first_byte;
    }

    /// Gets the number of elements in the run a composite refers to.
    ///
    /// Zero means the composite has not been initialized.
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn set_length(&mut self, length: usize) {
        self.length = length;
    }

    #[must_use]
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    pub fn set_line_number(&mut self, line_number: u64) {
        self.line_number = line_number;
    }

    /// Gets the adjustment applied to the pointer value by
    /// [`Self::adjusted_ptr_value`].
    #[must_use]
    pub fn value_offset(&self) -> i64 {
        self.value_offset
    }

    pub fn set_value_offset(&mut self, value_offset: i64) {
        self.value_offset = value_offset;
    }

    /// Copies this value into `dest`.
    ///
    /// The kind, raw value, size, offset, index and length are propagated. The
    /// scope and first-byte marker of `dest` are never overwritten.
    pub fn copy_into(&self, dest: &mut ShadowValue) {
        dest.kind = self.kind;
        dest.raw = self.raw;
        dest.size = self.size;
        dest.offset = self.offset;
        dest.index = self.index;
        dest.length = self.length;
    }

    /// Reads a value of `kind` starting `offset` bytes into the element at
    /// [`Self::index`] of `run`, the run that this composite refers to.
    ///
    /// The read may span several consecutive elements of the run, but never
    /// extends past [`Self::length`] elements.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if `self` is not a composite, if `kind` has no bytes to
    /// read, or if the requested bytes are not available in the run.
    pub fn read_value(&self, run: &[ShadowValue], offset: usize, kind: ValueKind) -> Result<RawValue> {
        if !self.kind.is_composite() {
            return Err(Error::NotComposite { kind: self.kind });
        }
        if kind == ValueKind::Void {
            return Err(Error::UnsupportedReadKind { kind });
        }

        let byte = kind.size();
        let start = self.index;
        let Some(first) = run.get(start) else {
            return Err(Error::OutOfBounds {
                index:     start,
                requested: offset + byte,
                available: 0,
            });
        };

        // The common case of an aligned read of a whole element.
        if offset == 0 && first.kind.size() == byte {
            return Ok(first.raw);
        }

        let bound = self.length.min(run.len());
        let mut next = start;
        let mut total = 0;
        while total < offset + byte && next < bound {
            total += run[next].kind.size();
            next += 1;
        }
        if total < offset + byte {
            return Err(Error::OutOfBounds {
                index:     start,
                requested: offset + byte,
                available: total,
            });
        }

        let content: Vec<u8> = run[start..next].iter().flat_map(ShadowValue::raw_bytes).collect();
        let window = &content[offset..offset + byte];

        let mut bytes = [0u8; RAW_VALUE_BYTES];
        let kept = byte.min(RAW_VALUE_BYTES);
        bytes[..kept].copy_from_slice(&window[..kept]);

        Ok(RawValue::from_le_bytes(bytes))
    }

    /// Overwrites up to `byte` bytes of this value's own storage, starting
    /// `offset` bytes in, with the start of `content`.
    ///
    /// The write is clamped so as not to exceed the size of this value's kind,
    /// and the number of bytes accepted is returned.
    pub fn set_value(&mut self, offset: usize, byte: usize, content: &[u8]) -> usize {
        let capacity = self.kind.size().saturating_sub(offset);
        let accepted = byte.min(capacity).min(content.len());

        let mut bytes = self.raw.to_le_bytes();
        for (i, b) in content.iter().take(accepted).enumerate() {
            // Bytes of the extended float beyond the raw storage are dropped.
            if let Some(slot) = bytes.get_mut(offset + i) {
                *slot = *b;
            }
        }
        self.raw = RawValue::from_le_bytes(bytes);

        accepted
    }

    /// Writes the first `byte` bytes of `src` starting `offset` bytes into the
    /// element at [`Self::index`] of `run`, the run that this composite refers
    /// to.
    ///
    /// A write that exactly covers the addressed element replaces it wholesale
    /// with a copy of `src`. Any other write is spread left to right across
    /// consecutive elements, with `offset` applying only to the first of them.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if `self` is not a composite or if the run ends before
    /// all `byte` bytes could be placed, in which case `run` is left untouched.
    pub fn write_value(
        &self,
        run: &mut [ShadowValue],
        offset: usize,
        byte: usize,
        src: &ShadowValue,
    ) -> Result<()> {
        if !self.kind.is_composite() {
            return Err(Error::NotComposite { kind: self.kind });
        }

        let start = self.index;
        let available = run.len();
        let Some(dest) = run.get_mut(start) else {
            return Err(Error::OutOfBounds {
                index: start,
                requested: offset + byte,
                available,
            });
        };

        // The common case of an aligned write of a whole element.
        if offset == 0 && dest.kind.size() == byte {
            src.copy_into(dest);
            return Ok(());
        }

        // The run must be able to take every byte before any element changes.
        let mut capacity = 0;
        let mut end = start;
        for (i, element) in run[start..].iter().enumerate() {
            if capacity >= byte {
                break;
            }
            let skipped = if i == 0 { offset } else { 0 };
            capacity += element.kind.size().saturating_sub(skipped);
            end = start + i + 1;
        }
        if capacity < byte {
            return Err(Error::OutOfBounds {
                index: end,
                requested: byte,
                available: capacity,
            });
        }

        let source = src.raw.to_le_bytes();
        let content: Vec<u8> = (0..byte).map(|i| source.get(i).copied().unwrap_or(0)).collect();

        let mut written = 0;
        let mut offset = offset;
        for (i, element) in run[start..end].iter_mut().enumerate() {
            let current = start + i;
            let accepted = element.set_value(offset, byte - written, &content[written..]);
            trace!(
                index = current,
                offset,
                accepted,
                kind = %element.kind,
                "wrote bytes into shadow element"
            );

            written += accepted;
            offset = 0;
        }

        Ok(())
    }

    /// Checks if the value is initialized, which only pointers of zero length
    /// are not.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.kind != ValueKind::Pointer || self.length > 0
    }

    /// Marks an uninitialized pointer as referring to exactly one element.
    pub fn set_initialized(&mut self) {
        if self.kind == ValueKind::Pointer && self.length == 0 {
            self.length = 1;
        }
    }

    /// Checks if the value is of `kind`.
    #[must_use]
    pub fn is_kind(&self, kind: ValueKind) -> bool {
        self.kind == kind
    }

    /// Gets the integer value, sign-extended from the width of the kind.
    ///
    /// One-bit integers are zero or one.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Truncation to the kind is intended
    pub fn int_value(&self) -> i64 {
        let v = self.raw.as_int();
        match self.kind {
            ValueKind::Int1 => i64::from(v != 0),
            ValueKind::Int8 => i64::from(v as i8),
            ValueKind::Int16 => i64::from(v as i16),
            ValueKind::Int32 => i64::from(v as i32),
            _ => v,
        }
    }

    /// Gets the region this composite refers to.
    #[must_use]
    pub fn ptr_value(&self) -> RegionId {
        RegionId::new(self.raw.bits())
    }

    /// Gets the pointer value with [`Self::value_offset`] applied.
    #[must_use]
    pub fn adjusted_ptr_value(&self) -> u64 {
        self.raw.bits().wrapping_add_signed(self.value_offset)
    }

    /// Gets the floating-point value, widened to double precision from the
    /// width of the kind.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Only the low word holds a float
    pub fn flp_value(&self) -> f64 {
        match self.kind {
            ValueKind::Flp32 => f64::from(f32::from_bits(self.raw.bits() as u32)),
            _ => f64::from_bits(self.raw.bits()),
        }
    }

    /// Gets the bytes this value occupies in the memory of the monitored
    /// program.
    fn raw_bytes(&self) -> Vec<u8> {
        let bytes = self.raw.to_le_bytes();
        (0..self.kind.size()).map(|i| bytes.get(i).copied().unwrap_or(0)).collect()
    }
}

impl Display for ShadowValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} => ", self.scope)?;
        match self.kind {
            ValueKind::Pointer | ValueKind::Array | ValueKind::Struct => {
                write!(f, "[{}: {}]", self.kind, self.ptr_value())?;
            }
            ValueKind::Int1 => {
                write!(f, "[INT1: {}], BitOffset: {}", self.int_value(), self.bit_offset)?;
            }
            ValueKind::Int8 | ValueKind::Int16 | ValueKind::Int32 | ValueKind::Int64 => {
                write!(f, "[{}: {}]", self.kind, self.int_value())?;
            }
            ValueKind::Flp32 | ValueKind::Flp64 | ValueKind::Flp80X86 => {
                write!(f, "[{}: {}]", self.kind, self.flp_value())?;
            }
            ValueKind::Void => write!(f, "[VOID]")?,
        }
        write!(
            f,
            ", Size: {}, Offset: {}, Index: {}, Line: {}, FirstByte: {}, Length: {}, Initialized: {}",
            self.size,
            self.offset,
            self.index,
            self.line_number,
            self.first_byte,
            self.length,
            self.is_initialized()
        )
    }
}
