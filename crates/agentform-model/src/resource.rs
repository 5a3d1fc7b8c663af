//! Storage resource declarations.
//!
//! A blueprint declares object buckets and key-value tables as plain data.
//! Identities are qualified with the deployment namespace at evaluation
//! time; a table's key schema is immutable once realized (changing it means
//! replacing the resource, not updating it).

use serde::{Deserialize, Serialize};

/// Attribute type for a table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Number,
}

/// A single key attribute (partition or sort).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyAttribute {
    pub name: String,
    pub attr_type: AttributeType,
}

impl KeyAttribute {
    pub fn string(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attr_type: AttributeType::String,
        }
    }
}

/// What happens to the realized resource when the deployment is destroyed.
///
/// Data stores carry `Retain`: destroying the deployment must not destroy
/// the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    Retain,
    Destroy,
}

/// Capacity mode for a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BillingMode {
    /// Pay-per-request; no throughput to size.
    OnDemand,
    /// Pre-provisioned read/write capacity units.
    Provisioned { read_units: u32, write_units: u32 },
}

/// Server-side encryption for a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketEncryption {
    KmsManaged,
    StoreManaged,
}

/// Object storage declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketSpec {
    pub versioned: bool,
    pub block_public_access: bool,
    pub enforce_ssl: bool,
    pub encryption: BucketEncryption,
}

impl BucketSpec {
    /// Hardened defaults: versioned, private, TLS-only, KMS-encrypted.
    pub fn hardened() -> Self {
        Self {
            versioned: true,
            block_public_access: true,
            enforce_ssl: true,
            encryption: BucketEncryption::KmsManaged,
        }
    }
}

/// Key-value table declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    /// Attribute holding the expiry timestamp. The store enforces expiry;
    /// the model only declares the attribute name.
    pub ttl_attribute: Option<String>,
    pub billing: BillingMode,
}

impl TableSpec {
    /// On-demand table with a single string partition key.
    pub fn keyed(partition_key: &str) -> Self {
        Self {
            partition_key: KeyAttribute::string(partition_key),
            sort_key: None,
            ttl_attribute: None,
            billing: BillingMode::OnDemand,
        }
    }

    pub fn with_sort_key(mut self, sort_key: &str) -> Self {
        self.sort_key = Some(KeyAttribute::string(sort_key));
        self
    }

    pub fn with_ttl_attribute(mut self, attribute: &str) -> Self {
        self.ttl_attribute = Some(attribute.to_string());
        self
    }
}

/// Either kind of storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageSpec {
    Bucket(BucketSpec),
    Table(TableSpec),
}

/// A declared storage resource, pre-resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDecl {
    /// Logical id, unique within the blueprint (e.g. `artifacts`, `runs`).
    pub id: String,
    pub removal: RemovalPolicy,
    pub spec: StorageSpec,
}

impl ResourceDecl {
    pub fn bucket(id: &str, spec: BucketSpec) -> Self {
        Self {
            id: id.to_string(),
            removal: RemovalPolicy::Retain,
            spec: StorageSpec::Bucket(spec),
        }
    }

    pub fn table(id: &str, spec: TableSpec) -> Self {
        Self {
            id: id.to_string(),
            removal: RemovalPolicy::Retain,
            spec: StorageSpec::Table(spec),
        }
    }

    /// Deployment-qualified name. Buckets join with `-`, tables with `_`,
    /// matching the naming rules of the respective stores.
    pub fn qualified_name(&self, namespace: &str) -> String {
        match self.spec {
            StorageSpec::Bucket(_) => format!("{namespace}-{}", self.id),
            StorageSpec::Table(_) => format!("{namespace}_{}", self.id),
        }
    }
}

/// A storage resource with its deployment-qualified identity fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedResource {
    pub id: String,
    pub name: String,
    pub removal: RemovalPolicy,
    pub spec: StorageSpec,
}

impl ResolvedResource {
    pub fn is_table(&self) -> bool {
        matches!(self.spec, StorageSpec::Table(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_names_use_hyphens() {
        let decl = ResourceDecl::bucket("artifacts", BucketSpec::hardened());
        assert_eq!(decl.qualified_name("agentform"), "agentform-artifacts");
    }

    #[test]
    fn table_names_use_underscores() {
        let decl = ResourceDecl::table("state", TableSpec::keyed("state_id"));
        assert_eq!(decl.qualified_name("agentform"), "agentform_state");
    }

    #[test]
    fn hardened_bucket_is_locked_down() {
        let spec = BucketSpec::hardened();
        assert!(spec.versioned);
        assert!(spec.block_public_access);
        assert!(spec.enforce_ssl);
        assert_eq!(spec.encryption, BucketEncryption::KmsManaged);
    }

    #[test]
    fn declared_resources_retain_data_by_default() {
        let bucket = ResourceDecl::bucket("artifacts", BucketSpec::hardened());
        let table = ResourceDecl::table("runs", TableSpec::keyed("run_id"));
        assert_eq!(bucket.removal, RemovalPolicy::Retain);
        assert_eq!(table.removal, RemovalPolicy::Retain);
    }

    #[test]
    fn table_builder_composes_sort_key_and_ttl() {
        let spec = TableSpec::keyed("pk")
            .with_sort_key("sk")
            .with_ttl_attribute("expires_at");
        assert_eq!(spec.sort_key.as_ref().unwrap().name, "sk");
        assert_eq!(spec.ttl_attribute.as_deref(), Some("expires_at"));
        assert_eq!(spec.billing, BillingMode::OnDemand);
    }

    #[test]
    fn storage_spec_serializes_tagged() {
        let spec = StorageSpec::Table(TableSpec::keyed("run_id"));
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "table");
        assert_eq!(json["partition_key"]["name"], "run_id");
    }
}
