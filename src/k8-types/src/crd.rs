/// static description of an api resource
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Crd {
    pub group: &'static str,
    pub version: &'static str,
    pub names: CrdNames,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CrdNames {
    pub kind: &'static str,
    pub plural: &'static str,
    pub singular: &'static str,
}
