// Copyright 2025 JiangLong.
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

//! Azure ML cluster extension domain

pub mod cluster;
pub mod installer;
pub mod manifest;
pub mod naming;
pub mod profile;
pub mod validator;

pub use self::cluster::{ClusterRef, ClusterType, ExtensionScope};
pub use self::installer::{AzureMlInstaller, CreateOutcome, CreateRequest, UpdateRequest};
pub use self::manifest::{Extension, Identity, PatchExtension};
pub use self::profile::{AmlProfile, REFERENCE_MAPPING};
