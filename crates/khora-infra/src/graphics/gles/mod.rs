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

//! The GLES dispatch core.
//!
//! A draw submitted to [`GlesRhi`] flows through three layers:
//!
//! - [`binder`] resolves the vertex declaration against the active program and
//!   binds only the attribute slots the program reads.
//! - [`state`] filters every state change through a [`shadow::ShadowState`],
//!   so a value already set on the context never reaches the driver twice.
//! - [`framebuffer`] caches one framebuffer object per color/depth pair.
//!
//! Immediate-mode draws copy their data into a [`arena::ScratchArena`] that is
//! handed out between a `begin_*` and the matching `end_*` call.
//!
//! Everything here belongs to the render thread. Nothing is `Sync`.

pub mod arena;
pub mod binder;
mod device;
pub mod framebuffer;
pub mod layout;
pub mod shadow;
pub mod state;

pub use self::arena::ScratchArena;
pub use self::binder::{BindReport, FallbackBuffers};
pub use self::device::GlesRhi;
pub use self::framebuffer::FramebufferCache;
pub use self::shadow::{BoundTargets, ShadowState};
pub use self::state::StateApplier;
