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

use crate::renderer::api::AttribMask;

/// The view the dispatch core has of the shader subsystem: which program is
/// bound and which attribute slots it reads.
pub trait ActiveShader {
    /// Returns `true` if a program is currently bound.
    fn is_program_bound(&self) -> bool;

    /// The concrete attribute slots the bound program reads.
    fn used_attrib_mask(&self) -> AttribMask;

    /// Maps an abstract slot (semantic location plus usage index) to the
    /// concrete slot the program reads it from.
    ///
    /// ## Returns
    /// `None` when the program does not consume the abstract slot.
    fn remap(&self, abstract_slot: u32) -> Option<u32>;

    /// The name of the material the program belongs to, for diagnostics.
    fn material_name(&self) -> Option<&str> {
        None
    }

    /// Switches to the flat-color program used to render meshes with missing
    /// attribute data.
    fn select_fallback_program(&mut self);
}
