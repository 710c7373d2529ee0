use std::env;
use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use tracing::debug;
use tracing::metadata::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use k8_codec::k8_types::core::pod::PodSpec;
use k8_codec::k8_types::core::replication_controller::ReplicationControllerSpec;
use k8_codec::k8_types::core::service::ServiceSpec;
use k8_codec::plan_drift;
use k8_codec::Drift;
use k8_codec::Resource;
use k8_config::CodecOptions;
use k8_config::ConfigNode;

const USAGE: &str = "usage: k8-drift <pod|service|replicationcontroller> <desired> <observed> [options]";

/// Performs following
///     decode desired and observed documents of the same kind
///     print the action needed to bring observed state to the desired one
fn main() {
    init_logger();
    if let Err(e) = run() {
        println!("{:#}", e);
        std::process::exit(1);
    }
}

fn init_logger() {
    let log_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter)
        .init();
}

struct Args {
    kind: String,
    desired: PathBuf,
    observed: PathBuf,
    options: Option<PathBuf>,
}

impl Args {
    fn parse() -> Result<Self> {
        let mut args = env::args().skip(1);
        let mut next = |what: &str| args.next().ok_or_else(|| anyhow!("missing {}\n{}", what, USAGE));
        let kind = next("resource kind")?;
        let desired = next("desired document")?.into();
        let observed = next("observed document")?.into();
        let options = args.next().map(PathBuf::from);
        Ok(Self {
            kind,
            desired,
            observed,
            options,
        })
    }
}

fn run() -> Result<()> {
    let args = Args::parse()?;
    let options = match &args.options {
        Some(path) => CodecOptions::from_file(path)
            .with_context(|| format!("reading options {}", path.display()))?,
        None => CodecOptions::default(),
    };
    debug!(?options, "codec options");

    let drift = match args.kind.to_lowercase().as_str() {
        "pod" => plan::<PodSpec>(&args, &options)?,
        "service" | "svc" => plan::<ServiceSpec>(&args, &options)?,
        "replicationcontroller" | "rc" => plan::<ReplicationControllerSpec>(&args, &options)?,
        other => return Err(anyhow!("unsupported resource kind {}\n{}", other, USAGE)),
    };

    println!("{}", serde_json::to_string_pretty(&drift)?);
    Ok(())
}

fn plan<S: Resource>(args: &Args, options: &CodecOptions) -> Result<Drift> {
    let desired = ConfigNode::from_file(&args.desired)
        .and_then(ConfigNode::into_document)
        .with_context(|| format!("reading {}", args.desired.display()))?;
    let observed = ConfigNode::from_file(&args.observed)
        .and_then(ConfigNode::into_document)
        .with_context(|| format!("reading {}", args.observed.display()))?;

    let desired = S::decode(&desired, options).context("decoding desired document")?;
    let observed = S::decode(&observed, options).context("decoding observed document")?;

    Ok(plan_drift(&desired, &observed)?)
}
