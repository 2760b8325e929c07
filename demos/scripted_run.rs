use std::env;
use std::path::Path;

use vehiscan::detection::decode::DecodedFrame;
use vehiscan::{
    Detector, LabelTable, PipelineConfig, RawDetections, RunLog, ScanOutcome, ScanPipeline,
};

/// Stand-in detector so the pipeline can be exercised without a model file.
struct CannedDetector;

impl Detector for CannedDetector {
    fn detect(&self, _frame: &DecodedFrame) -> anyhow::Result<RawDetections> {
        Ok(RawDetections {
            classes: vec![2, 5, 0],
            scores: vec![0.82, 0.3, 0.91],
        })
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <image_path>", args[0]);
        std::process::exit(1);
    }

    let config = PipelineConfig {
        slots: 3,
        ..Default::default()
    };
    let pipeline = ScanPipeline::new(config, LabelTable::coco());
    let mut log = RunLog::new();

    let outcome = pipeline.run(&CannedDetector, Path::new(&args[1]), &mut log)?;

    println!("=== Results ===");
    match &outcome {
        ScanOutcome::Found(detections) => {
            for detection in detections {
                println!("  {} (conf: {:.2})", detection.label, detection.score);
            }
        }
        ScanOutcome::Empty => println!("  no detections"),
    }

    println!("\n=== Run log ===");
    for entry in log.entries() {
        println!("  {}", entry.display_line());
    }

    Ok(())
}
