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

//! Azure Resource Manager clients

pub mod alerts;
pub mod client;
pub mod extensions;
pub mod locks;
pub mod loganalytics;
pub mod provisioner;
pub mod relay;
pub mod resources;
pub mod servicebus;

pub use self::alerts::{alerts_management_client, AlertsManagementClient};
pub use self::client::ArmClient;
pub use self::extensions::{ArmExtensionClient, ExtensionClient};
pub use self::provisioner::{
    ArmAuxiliaryResources, AuxiliaryResources, LogAnalyticsConnection, ProvisionTarget,
    RelayConnection, ServiceBusConnection,
};
pub use self::resources::{ArmResourceLookup, ResourceLookup};
