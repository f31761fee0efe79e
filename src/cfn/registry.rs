//! Resource-type registry: which CloudFormation types can be drawn, and how.
//!
//! The registry is built once at startup and shared read-only. Adding a
//! drawable type means adding one row to `AWS_RESOURCES` and shipping the
//! icon under `<ICON_DIR>/<category>/<file>`.

use std::collections::HashMap;

/// Visual grouping of a resource type. Doubles as the icon subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Network,
    Compute,
    Security,
    Database,
    Storage,
    Integration,
    Monitoring,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Compute => "compute",
            Self::Security => "security",
            Self::Database => "database",
            Self::Storage => "storage",
            Self::Integration => "integration",
            Self::Monitoring => "management",
        }
    }
}

/// How one recognized resource type is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceKind {
    pub category: Category,
    /// Icon file name inside the category directory.
    pub icon: &'static str,
}

impl ResourceKind {
    /// Icon path relative to the icon root, e.g. `compute/lambda.png`.
    #[must_use]
    pub fn icon_path(&self) -> String {
        format!("{}/{}", self.category.as_str(), self.icon)
    }
}

const AWS_RESOURCES: &[(&str, Category, &str)] = &[
    // Network
    ("AWS::EC2::VPC", Category::Network, "vpc.png"),
    ("AWS::EC2::Subnet", Category::Network, "public-subnet.png"),
    ("AWS::ElasticLoadBalancingV2::LoadBalancer", Category::Network, "elastic-load-balancing.png"),
    ("AWS::Route53::RecordSet", Category::Network, "route-53.png"),
    // Compute
    ("AWS::EC2::Instance", Category::Compute, "ec2.png"),
    ("AWS::Lambda::Function", Category::Compute, "lambda.png"),
    ("AWS::ECS::Cluster", Category::Compute, "elastic-container-service.png"),
    ("AWS::ECS::Service", Category::Compute, "elastic-container-service-service.png"),
    ("AWS::ECS::TaskDefinition", Category::Compute, "elastic-container-service-container.png"),
    // Security
    ("AWS::EC2::SecurityGroup", Category::Security, "shield.png"),
    ("AWS::IAM::Role", Category::Security, "identity-and-access-management-iam-role.png"),
    ("AWS::SecurityHub::Hub", Category::Security, "security-hub.png"),
    // Database
    ("AWS::RDS::DBInstance", Category::Database, "rds.png"),
    ("AWS::DynamoDB::Table", Category::Database, "dynamodb.png"),
    // Storage
    ("AWS::S3::Bucket", Category::Storage, "simple-storage-service-s3.png"),
    // Integration
    ("AWS::SQS::Queue", Category::Integration, "simple-queue-service-sqs.png"),
    ("AWS::SNS::Topic", Category::Integration, "simple-notification-service-sns.png"),
    // Monitoring
    ("AWS::CloudWatch::Alarm", Category::Monitoring, "cloudwatch.png"),
];

/// Lookup table from resource type string to [`ResourceKind`].
#[derive(Debug, Clone)]
pub struct ResourceRegistry {
    kinds: HashMap<&'static str, ResourceKind>,
}

impl ResourceRegistry {
    /// Registry of the AWS resource types this service can draw.
    #[must_use]
    pub fn aws() -> Self {
        let kinds = AWS_RESOURCES
            .iter()
            .map(|&(resource_type, category, icon)| (resource_type, ResourceKind { category, icon }))
            .collect();
        Self { kinds }
    }

    #[must_use]
    pub fn get(&self, resource_type: &str) -> Option<ResourceKind> {
        self.kinds.get(resource_type).copied()
    }

    /// Every drawable kind, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.kinds.values().copied()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::aws()
    }
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
