use clap::Parser;
use std::path::PathBuf;

use vehiscan::{
    DetectorSpec, LabelTable, OnnxDetector, PipelineConfig, ScanOutcome, ScanPipeline, ScanSession,
};

#[derive(Parser)]
#[command(name = "vehiscan")]
#[command(about = "Detect vehicles and other objects in a photo")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: PathBuf,

    /// Path to the ONNX detector model
    #[arg(short, long, value_name = "MODEL")]
    model: PathBuf,

    /// JSON file mapping class indices to labels (defaults to the built-in COCO table)
    #[arg(long, value_name = "FILE")]
    labels: Option<PathBuf>,

    /// Minimum confidence a detection must exceed to be reported
    #[arg(long, default_value_t = 0.4)]
    threshold: f32,

    /// Detector input edge length in pixels
    #[arg(long, default_value_t = 320)]
    input_size: u32,

    /// Number of detection slots the model reports per call
    #[arg(long, default_value_t = 25)]
    slots: usize,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    let labels = match &args.labels {
        Some(path) => LabelTable::from_json_file(path)?,
        None => LabelTable::coco(),
    };

    let config = PipelineConfig {
        input_size: args.input_size,
        threshold: args.threshold,
        slots: args.slots,
        ..PipelineConfig::default()
    };
    let spec = DetectorSpec {
        input_size: args.input_size,
        ..DetectorSpec::default()
    };

    let mut session = ScanSession::new(ScanPipeline::new(config, labels));
    session.load_model(|| OnnxDetector::load(&args.model, spec))?;

    // The image path was already picked on the command line, so capture
    // begins and resolves immediately.
    session.begin_capture();
    let outcome = session.process(&args.image_path)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(outcome.detections())?);
        return Ok(());
    }

    println!("\n=== Detection Results ===");
    match &outcome {
        ScanOutcome::Found(detections) => {
            println!("Total detections: {}\n", detections.len());
            for detection in detections {
                println!("  {} - confidence: {:.2}", detection.label, detection.score);
            }
        }
        ScanOutcome::Empty => {
            println!("No objects detected.");
        }
    }

    if args.verbose {
        println!("\n=== Run Log ===");
        for entry in session.log().entries() {
            println!("  {}", entry.display_line());
        }
    }

    Ok(())
}
