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

use clap::ValueEnum;
use std::fmt;

/// Kind of Kubernetes cluster an extension is installed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClusterType {
    #[value(name = "connectedClusters")]
    ConnectedClusters,
    #[value(name = "managedClusters")]
    ManagedClusters,
    #[value(name = "appliances")]
    Appliances,
    #[value(name = "provisionedClusters")]
    ProvisionedClusters,
}

impl ClusterType {
    pub fn resource_provider(&self) -> &'static str {
        match self {
            Self::ConnectedClusters => "Microsoft.Kubernetes",
            Self::ManagedClusters => "Microsoft.ContainerService",
            Self::Appliances => "Microsoft.ResourceConnector",
            Self::ProvisionedClusters => "Microsoft.HybridContainerService",
        }
    }

    /// API version used to read the cluster resource itself.
    pub fn api_version(&self) -> &'static str {
        match self {
            Self::ConnectedClusters => "2021-10-01",
            Self::ManagedClusters => "2023-01-01",
            Self::Appliances => "2021-10-31-preview",
            Self::ProvisionedClusters => "2022-05-01-preview",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectedClusters => "connectedClusters",
            Self::ManagedClusters => "managedClusters",
            Self::Appliances => "appliances",
            Self::ProvisionedClusters => "provisionedClusters",
        }
    }
}

impl fmt::Display for ClusterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Installation scope of an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExtensionScope {
    Cluster,
    Namespace,
}

impl fmt::Display for ExtensionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cluster => f.write_str("cluster"),
            Self::Namespace => f.write_str("namespace"),
        }
    }
}

/// A cluster addressed by subscription, resource group, type and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterRef {
    pub subscription_id: String,
    pub resource_group: String,
    pub cluster_type: ClusterType,
    pub cluster_name: String,
}

impl ClusterRef {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group: impl Into<String>,
        cluster_type: ClusterType,
        cluster_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group: resource_group.into(),
            cluster_type,
            cluster_name: cluster_name.into(),
        }
    }

    pub fn resource_id(&self) -> String {
        format!(
            "/subscriptions/{}/resourceGroups/{}/providers/{}/{}/{}",
            self.subscription_id,
            self.resource_group,
            self.cluster_type.resource_provider(),
            self.cluster_type,
            self.cluster_name
        )
    }
}
