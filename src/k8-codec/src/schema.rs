//! Field catalog of every configuration block.
//!
//! Each function builds a fresh value; nothing here is shared between calls.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
    /// filled by the platform when not supplied
    Computed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    /// a change can only be applied by recreating the resource
    ForceNew,
    Updatable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueKind {
    String,
    Int,
    Bool,
    StringList,
    StringMap,
    Block(Schema),
    BlockList(Schema),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: ValueKind,
    pub presence: Presence,
    pub mutability: Mutability,
}

impl FieldSchema {
    fn new(name: &'static str, kind: ValueKind, presence: Presence) -> Self {
        Self {
            name,
            kind,
            presence,
            mutability: Mutability::Updatable,
        }
    }

    pub fn required(name: &'static str, kind: ValueKind) -> Self {
        Self::new(name, kind, Presence::Required)
    }

    pub fn optional(name: &'static str, kind: ValueKind) -> Self {
        Self::new(name, kind, Presence::Optional)
    }

    pub fn computed(name: &'static str, kind: ValueKind) -> Self {
        Self::new(name, kind, Presence::Computed)
    }

    pub fn force_new(mut self) -> Self {
        self.mutability = Mutability::ForceNew;
        self
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    /// schema of a nested block or block list
    pub fn nested(&self) -> Option<&Schema> {
        match &self.kind {
            ValueKind::Block(schema) | ValueKind::BlockList(schema) => Some(schema),
            _ => None,
        }
    }
}

/// ordered set of fields of one block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// fields of `other` appended after the own fields
    pub fn extend(mut self, other: Schema) -> Self {
        self.fields.extend(other.fields);
        self
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_force_new(&self, name: &str) -> bool {
        self.field(name)
            .map_or(false, |f| f.mutability == Mutability::ForceNew)
    }
}

use FieldSchema as F;
use ValueKind::*;

/// identity shared by every top level resource
pub fn meta_schema() -> Schema {
    Schema::new(vec![
        F::required("name", String).force_new(),
        F::optional("namespace", String).force_new(),
        F::optional("labels", StringMap),
    ])
}

pub fn container_port_schema() -> Schema {
    Schema::new(vec![
        F::optional("protocol", String).force_new(),
        F::required("containerPort", String).force_new(),
        F::required("name", String).force_new(),
    ])
}

pub fn env_schema() -> Schema {
    Schema::new(vec![
        F::required("name", String),
        F::optional("value", String),
    ])
}

pub fn volume_mount_schema() -> Schema {
    Schema::new(vec![
        F::required("name", String),
        F::optional("readOnly", Bool),
        F::required("mountPath", String),
    ])
}

pub fn exec_schema() -> Schema {
    Schema::new(vec![F::required("command", StringList).force_new()])
}

pub fn http_get_schema() -> Schema {
    Schema::new(vec![
        F::required("path", String).force_new(),
        F::required("port", String).force_new(),
        F::required("host", String).force_new(),
        F::required("scheme", String).force_new(),
    ])
}

/// branches of a probe handler
pub fn probe_handler_schema() -> Schema {
    Schema::new(vec![
        F::optional("exec", BlockList(exec_schema())).force_new(),
        F::optional("httpGet", Block(http_get_schema())).force_new(),
    ])
}

pub fn probe_schema() -> Schema {
    Schema::new(vec![
        F::optional("initialDelaySeconds", Int),
        F::optional("timeoutSeconds", Int),
    ])
    .extend(probe_handler_schema())
}

pub fn container_schema() -> Schema {
    Schema::new(vec![
        F::required("name", String).force_new(),
        F::required("image", String),
        F::optional("port", BlockList(container_port_schema())).force_new(),
        F::optional("env", BlockList(env_schema())),
        F::optional("volumeMount", BlockList(volume_mount_schema())),
        F::optional("livenessProbe", BlockList(probe_schema())),
        F::optional("readinessProbe", BlockList(probe_schema())),
        F::optional("command", StringList),
        F::optional("args", StringList),
        F::optional("imagePullPolicy", String),
        F::optional("terminationMessagePath", String),
    ])
}

pub fn empty_dir_schema() -> Schema {
    Schema::new(vec![F::optional("medium", String)])
}

pub fn host_path_schema() -> Schema {
    Schema::new(vec![F::required("path", String)])
}

pub fn aws_elastic_block_store_schema() -> Schema {
    Schema::new(vec![
        F::required("volumeID", String),
        F::optional("fsType", String),
        F::optional("partition", Int),
        F::optional("readOnly", Bool),
    ])
}

/// branches of a volume source
pub fn volume_source_schema() -> Schema {
    Schema::new(vec![
        F::optional("emptyDir", Block(empty_dir_schema())),
        F::optional("hostPath", Block(host_path_schema())),
        F::optional("awsElasticBlockStore", Block(aws_elastic_block_store_schema())),
    ])
}

pub fn volume_schema() -> Schema {
    Schema::new(vec![F::required("name", String)]).extend(volume_source_schema())
}

/// pod level fields, without identity
pub fn pod_spec_schema() -> Schema {
    Schema::new(vec![
        F::computed("nodeName", String),
        F::computed("terminationGracePeriodSeconds", String),
        F::optional("container", BlockList(container_schema())).force_new(),
        F::optional("volume", BlockList(volume_schema())).force_new(),
        F::optional("restartPolicy", String),
        F::optional("dnsPolicy", String),
        F::optional("serviceAccountName", String),
    ])
}

pub fn pod_schema() -> Schema {
    meta_schema().extend(pod_spec_schema())
}

/// pod block nested in a replication controller
pub fn pod_template_schema() -> Schema {
    Schema::new(vec![F::optional("labels", StringMap)]).extend(pod_spec_schema())
}

pub fn service_port_schema() -> Schema {
    Schema::new(vec![
        F::required("name", String).force_new(),
        F::optional("protocol", String).force_new(),
        F::required("port", Int).force_new(),
        F::required("targetPort", String).force_new(),
        F::computed("nodePort", Int).force_new(),
    ])
}

pub fn service_schema() -> Schema {
    meta_schema().extend(Schema::new(vec![
        F::required("selector", StringMap),
        F::computed("clusterIP", String),
        F::computed("type", String).force_new(),
        F::optional("port", BlockList(service_port_schema())).force_new(),
    ]))
}

pub fn replication_controller_schema() -> Schema {
    meta_schema().extend(Schema::new(vec![
        F::optional("replicas", Int),
        F::optional("selector", StringMap),
        F::required("pod", Block(pod_template_schema())).force_new(),
    ]))
}
