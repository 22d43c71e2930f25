use cobalt_nn::{Network, TrainConfig, Trainer, TrainingSet};

fn main() {
    env_logger::init();

    let network = Network::new(2, &[2], 1, -1.0, 1.0);
    let cases = TrainingSet::from_pairs(vec![
        (vec![0.0, 0.0], vec![0.0]),
        (vec![0.0, 1.0], vec![1.0]),
        (vec![1.0, 0.0], vec![1.0]),
        (vec![1.0, 1.0], vec![0.0]),
    ]);

    let mut trainer = Trainer::new(network, cases).expect("case dimensions match the network");
    println!("initial error: {:.6}", trainer.error());

    let mut config = TrainConfig::new(1.0, 2.0, 100_000, 0.001, 0.0);
    config.report_period = 5_000;
    let report = trainer.train(&config);

    println!(
        "finished after {} steps, error {:.6}",
        report.steps, report.final_error
    );
    for reason in &report.reasons {
        println!("  {reason}");
    }

    let mut network = trainer.into_network();
    for input in [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]] {
        println!("{:?} -> {:.4}", input, network.evaluate(&input)[0]);
    }
}
