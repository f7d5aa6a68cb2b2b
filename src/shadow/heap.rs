//! This module contains the owner of the runs of shadow values that composite
//! values refer to.

use crate::{
    error::{self, container::Locatable, memory::Error},
    shadow::{RawValue, RegionId, Scope, ShadowValue, ValueKind},
};

/// A store of contiguous runs of shadow values.
///
/// Composite shadow values refer to a run by its [`RegionId`] rather than by
/// address, and each run lives for as long as the heap does.
#[derive(Clone, Debug, Default)]
pub struct ShadowHeap {
    regions: Vec<Vec<ShadowValue>>,
}

impl ShadowHeap {
    /// Constructs a new heap that owns no regions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `elements` as a new region, returning its handle.
    ///
    /// The index of every element is set to its position in the region.
    pub fn allocate(&mut self, elements: impl IntoIterator<Item = ShadowValue>) -> RegionId {
        let mut elements: Vec<ShadowValue> = elements.into_iter().collect();
        elements.iter_mut().enumerate().for_each(|(i, e)| e.set_index(i));

        let id = RegionId::new(self.regions.len() as u64);
        self.regions.push(elements);
        id
    }

    /// Constructs a pointer in `scope` to the element at `index` of `region`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if `region` is not owned by this heap.
    pub fn pointer(
        &self,
        scope: Scope,
        region: RegionId,
        index: usize,
    ) -> Result<ShadowValue, Error> {
        let length = self.region(region).ok_or(Error::DanglingRegion { region })?.len();
        Ok(ShadowValue::pointer(scope, region, index, length))
    }

    /// Gets the elements of `region`, if it is owned by this heap.
    #[must_use]
    pub fn region(&self, region: RegionId) -> Option<&[ShadowValue]> {
        let index = usize::try_from(region.id()).ok()?;
        self.regions.get(index).map(Vec::as_slice)
    }

    /// Gets the elements of `region` mutably, if it is owned by this heap.
    #[must_use]
    pub fn region_mut(&mut self, region: RegionId) -> Option<&mut [ShadowValue]> {
        let index = usize::try_from(region.id()).ok()?;
        self.regions.get_mut(index).map(Vec::as_mut_slice)
    }

    /// Reads a value of `kind` from `offset` bytes past the element that
    /// `pointer` refers to.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] located at the source line of `pointer` if the region is
    /// not owned by this heap or the read itself fails.
    pub fn read(
        &self,
        pointer: &ShadowValue,
        offset: usize,
        kind: ValueKind,
    ) -> error::Result<RawValue> {
        let line = pointer.line_number();
        let region = pointer.ptr_value();
        let run = self
            .region(region)
            .ok_or(Error::DanglingRegion { region })
            .locate(line)?;

        Ok(pointer.read_value(run, offset, kind).locate(line)?)
    }

    /// Writes the first `byte` bytes of `src` to `offset` bytes past the
    /// element that `pointer` refers to.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] located at the source line of `pointer` if the region is
    /// not owned by this heap or the write itself fails.
    pub fn write(
        &mut self,
        pointer: &ShadowValue,
        offset: usize,
        byte: usize,
        src: &ShadowValue,
    ) -> error::Result<()> {
        let line = pointer.line_number();
        let region = pointer.ptr_value();
        let run = self
            .region_mut(region)
            .ok_or(Error::DanglingRegion { region })
            .locate(line)?;

        pointer.write_value(run, offset, byte, src).locate(line)?;
        Ok(())
    }

    /// Gets the number of regions owned by the heap.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Checks if the heap owns no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod test {
    use crate::{
        error::{self, memory::Error},
        shadow::{heap::ShadowHeap, RegionId, Scope, ShadowValue, ValueKind},
    };

    #[test]
    fn allocation_assigns_element_indices() {
        let mut heap = ShadowHeap::new();
        let elements = vec![ShadowValue::flp64(Scope::Global, 1.0); 3];
        let region = heap.allocate(elements);

        let run = heap.region(region).expect("region was just allocated");
        let indices: Vec<usize> = run.iter().map(ShadowValue::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn writes_through_a_pointer_are_visible_to_reads() -> anyhow::Result<()> {
        let mut heap = ShadowHeap::new();
        let region = heap.allocate(vec![ShadowValue::int(Scope::Local, ValueKind::Int32, 0); 2]);
        let pointer = heap.pointer(Scope::Register, region, 0)?;
        let src = ShadowValue::flp64(Scope::Register, -0.375);

        heap.write(&pointer, 0, 8, &src)?;
        let raw = heap.read(&pointer, 0, ValueKind::Flp64)?;
        assert_eq!(f64::from_bits(raw.bits()), -0.375);

        Ok(())
    }

    #[test]
    fn dangling_regions_are_located_at_the_pointer_line() {
        let heap = ShadowHeap::new();
        let mut pointer = ShadowValue::pointer(Scope::Local, RegionId::new(4), 0, 1);
        pointer.set_line_number(31);

        let errors = heap.read(&pointer, 0, ValueKind::Int8).unwrap_err();
        assert_eq!(errors.len(), 1);
        let err = &errors.payloads()[0];
        assert_eq!(err.location, 31);
        assert_eq!(
            err.payload,
            error::Error::Memory(Error::DanglingRegion {
                region: RegionId::new(4),
            })
        );
    }
}
