use k8_config::ConfigNode;

const DOCUMENT: &str = "K8_DOCUMENT";

fn main() {
    // Read the K8_DOCUMENT env var for a path to a yaml or json document
    // and print the configuration tree it holds

    fluvio_future::subscriber::init_tracer(None);
    let path = std::env::var(DOCUMENT).unwrap_or_else(|_| "data/pod.yaml".to_owned());
    let node = ConfigNode::from_file(path).expect("Load failed");

    println!("{node:#?}")
}
