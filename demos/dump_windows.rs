use tracing::info;
use trajprep::{Error, LoaderConfig, TrajectoryLoader};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trajprep=info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let data_root = args.next().unwrap_or_else(|| String::from("data"));
    let infer = matches!(args.next().as_deref(), Some("--infer"));

    let loader = TrajectoryLoader::new(LoaderConfig::new(data_root).with_infer(infer))?;

    let mut total = 0;
    let mut objects = 0;

    for window in loader.windows() {
        let window = window?;
        let input = loader.preprocess(&window);

        println!(
            "window {} objects {} input {:?}",
            window.slice_id(),
            window.len(),
            input.batch().shape()
        );

        total += 1;
        objects += window.len();
    }

    info!(files = loader.files().len(), windows = total, objects, "done");

    Ok(())
}
