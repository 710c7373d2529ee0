use k8_config::ConfigNode;
use k8_types::core::pod::ExecAction;
use k8_types::core::pod::HttpGetAction;
use k8_types::core::pod::Probe;
use k8_types::core::pod::ProbeHandler;
use k8_types::EnumValue;

use crate::block::Block;
use crate::builder::string_list;
use crate::builder::NodeBuilder;
use crate::coerce::decode_int_or_string;
use crate::coerce::encode_int_or_string;
use crate::coerce::parse_scheme;
use crate::schema::probe_handler_schema;
use crate::schema::probe_schema;
use crate::CodecError;
use crate::FieldPath;

use super::select_variant;

#[derive(Debug, Clone, Copy)]
enum HandlerKind {
    Exec,
    HttpGet,
}

const HANDLERS: [(&str, HandlerKind); 2] = [
    ("exec", HandlerKind::Exec),
    ("httpGet", HandlerKind::HttpGet),
];

pub(crate) fn handler_from_block(block: &Block) -> Result<ProbeHandler, CodecError> {
    let (key, kind) = select_variant(block, &HANDLERS)?;
    let handler = block
        .block(key)?
        .ok_or_else(|| CodecError::missing(block.path().child(key)))?;

    Ok(match kind {
        HandlerKind::Exec => ProbeHandler::Exec(ExecAction {
            command: handler
                .string_list("command")?
                .ok_or_else(|| CodecError::missing(handler.path().child("command")))?,
        }),
        HandlerKind::HttpGet => ProbeHandler::HttpGet(HttpGetAction {
            path: handler.required_string("path")?,
            port: handler.required("port", decode_int_or_string)?,
            host: handler.required_string("host")?,
            scheme: handler.required("scheme", parse_scheme)?,
        }),
    })
}

pub(crate) fn probe_from_block(block: &Block) -> Result<Probe, CodecError> {
    Ok(Probe {
        initial_delay_seconds: block.int32("initialDelaySeconds")?,
        timeout_seconds: block.int32("timeoutSeconds")?,
        handler: handler_from_block(block)?,
    })
}

pub fn decode_probe_handler(node: &ConfigNode) -> Result<ProbeHandler, CodecError> {
    let block = Block::open(node, probe_handler_schema(), FieldPath::root())?;
    handler_from_block(&block)
}

pub fn decode_probe(node: &ConfigNode) -> Result<Probe, CodecError> {
    let block = Block::open(node, probe_schema(), FieldPath::root())?;
    probe_from_block(&block)
}

/// branch key and content of the handler
pub fn encode_probe_handler(handler: &ProbeHandler) -> (&'static str, ConfigNode) {
    match handler {
        ProbeHandler::Exec(exec) => (
            "exec",
            ConfigNode::List(vec![NodeBuilder::new()
                .set("command", string_list(&exec.command))
                .build()]),
        ),
        ProbeHandler::HttpGet(http_get) => (
            "httpGet",
            NodeBuilder::new()
                .set("path", http_get.path.as_str())
                .set("port", encode_int_or_string(&http_get.port))
                .set("host", http_get.host.as_str())
                .set("scheme", http_get.scheme.as_str())
                .build(),
        ),
    }
}

pub fn encode_probe(probe: &Probe) -> ConfigNode {
    let (key, handler) = encode_probe_handler(&probe.handler);
    NodeBuilder::new()
        .opt("initialDelaySeconds", probe.initial_delay_seconds.map(i64::from))
        .opt("timeoutSeconds", probe.timeout_seconds.map(i64::from))
        .set(key, handler)
        .build()
}
