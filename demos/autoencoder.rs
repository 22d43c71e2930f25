//! Trains a network to reproduce a grayscale image through a narrower
//! hidden layer, then writes the reconstruction next to the original.
//!
//! Run with:
//!   cargo run --example autoencoder --release -- path/to/image.bmp

use cobalt_nn::{pixel, Network, TrainConfig, Trainer, TrainingSet};

fn main() {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "10x10.bmp".to_string());
    let (pixels, shape) = pixel::grayscale_pixels(&path).expect("readable input image");
    let n = pixels.len();
    let hidden = (n / 2).max(1);

    println!(
        "{}: {}x{} -> {n} inputs, {hidden} hidden nodes",
        path, shape.width, shape.height
    );

    let network = Network::new(n, &[hidden], n, -1.0, 1.0);
    let mut cases = TrainingSet::new();
    cases.push(pixels.clone(), pixels.clone());

    let mut trainer = Trainer::new(network, cases).expect("identity case matches the network");
    println!("initial error: {:.6}", trainer.error());

    let mut config = TrainConfig::new(1.0, 1.0001, 100_000, 1e-4, 0.0);
    config.report_period = 10_000;
    let report = trainer.train(&config);

    println!(
        "finished after {} steps, error {:.6}",
        report.steps, report.final_error
    );

    let mut network = trainer.into_network();
    let reconstruction = network.evaluate(&pixels);
    pixel::write_grayscale("reconstructed.bmp", &reconstruction, shape)
        .expect("writable output image");
    println!("wrote reconstructed.bmp");
}
