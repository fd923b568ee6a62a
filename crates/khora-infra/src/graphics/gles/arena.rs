// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fixed-capacity scratch memory for immediate-mode draws.

use bytemuck::{Pod, Zeroable};
use khora_core::renderer::PreconditionError;

/// Alignment of every allocation, in bytes.
pub const SCRATCH_ALIGNMENT: usize = 16;

#[repr(C, align(16))]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Block([u8; SCRATCH_ALIGNMENT]);

const fn align_up(size: usize) -> usize {
    (size + SCRATCH_ALIGNMENT - 1) & !(SCRATCH_ALIGNMENT - 1)
}

/// A bump buffer that holds the data of exactly one immediate-mode draw.
///
/// The storage is allocated once and never moves, so [`ScratchArena::base_address`]
/// is stable for the arena's life. At most one allocation may be outstanding.
#[derive(Debug)]
pub struct ScratchArena {
    label: &'static str,
    storage: Vec<Block>,
    outstanding: u32,
    high_water: usize,
}

impl std::fmt::Debug for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Block")
    }
}

impl ScratchArena {
    /// Creates an arena of at least `capacity` bytes.
    pub fn new(label: &'static str, capacity: usize) -> Self {
        let blocks = align_up(capacity) / SCRATCH_ALIGNMENT;
        log::debug!("ScratchArena '{label}': {} bytes", blocks * SCRATCH_ALIGNMENT);
        Self {
            label,
            storage: vec![Block::zeroed(); blocks],
            outstanding: 0,
            high_water: 0,
        }
    }

    /// The arena's label, used in diagnostics.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.storage.len() * SCRATCH_ALIGNMENT
    }

    /// Number of outstanding allocations, 0 or 1.
    pub fn outstanding(&self) -> u32 {
        self.outstanding
    }

    /// Largest allocation served so far, in aligned bytes.
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Address of the first byte. Stable for the arena's life.
    pub fn base_address(&self) -> usize {
        self.storage.as_ptr() as usize
    }

    /// Checks that an allocation of `size` bytes would succeed.
    ///
    /// ## Errors
    /// * `PreconditionError::ScratchArenaBusy` - the previous allocation has not
    ///   been released.
    /// * `PreconditionError::ScratchAllocationTooLarge` - `size`, rounded up to
    ///   the alignment, exceeds the capacity.
    pub fn check(&self, size: usize) -> Result<(), PreconditionError> {
        if self.outstanding != 0 {
            return Err(PreconditionError::ScratchArenaBusy { arena: self.label });
        }
        let aligned = align_up(size);
        if aligned > self.capacity() {
            return Err(PreconditionError::ScratchAllocationTooLarge {
                arena: self.label,
                requested: aligned,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    /// Hands out the first `size` bytes of the arena.
    ///
    /// ## Errors
    /// See [`Self::check`].
    pub fn allocate(&mut self, size: usize) -> Result<&mut [u8], PreconditionError> {
        self.check(size)?;
        self.outstanding = 1;
        self.high_water = self.high_water.max(align_up(size));
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(self.storage.as_mut_slice());
        Ok(&mut bytes[..size])
    }

    /// The first `len` bytes, as last written by the holder of an allocation.
    pub fn contents(&self, len: usize) -> &[u8] {
        let bytes: &[u8] = bytemuck::cast_slice(self.storage.as_slice());
        &bytes[..len.min(bytes.len())]
    }

    /// Releases the outstanding allocation. Releasing with nothing outstanding
    /// is logged and otherwise ignored.
    pub fn deallocate(&mut self) {
        if self.outstanding == 0 {
            log::warn!(
                "ScratchArena '{}': deallocate without a matching allocate",
                self.label
            );
            return;
        }
        self.outstanding -= 1;
    }
}
