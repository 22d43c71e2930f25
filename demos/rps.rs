//! Interactive rock-paper-scissors against the network.
//!
//! The input vector holds the outcomes and one-hot moves of the player's
//! last two rounds; the three outputs score our candidate moves. After
//! every round the game history becomes the training set and a fresh
//! network is trained on it from scratch.

use std::io::{self, BufRead, Write};

use cobalt_nn::{Network, TrainConfig, Trainer, TrainingSet};

const INPUTS: usize = 8;
const MOVES: [&str; 3] = ["rock", "paper", "scissors"];

// Payoff for each of our moves (rock, paper, scissors) given the player's
// move: 1 we win, 0.5 tie, 0 we lose.
const VS_ROCK: [f64; 3] = [0.5, 1.0, 0.0];
const VS_PAPER: [f64; 3] = [0.0, 0.5, 1.0];
const VS_SCISSORS: [f64; 3] = [1.0, 0.0, 0.5];

fn main() {
    env_logger::init();

    let stdin = io::stdin();
    let mut history = TrainingSet::new();
    let mut inputs = vec![0.0; INPUTS];
    let mut network = Network::new(INPUTS, &[4], 3, -1.0, 1.0);

    let (mut wins, mut ties, mut losses) = (0u32, 0u32, 0u32);
    let mut rounds = 0u32;

    println!("rock / paper / scissors (anything else quits)");
    loop {
        let scores = network.evaluate(&inputs);
        let choice = scores
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .unwrap_or(0);

        println!("won {wins}/{rounds}, tied {ties}/{rounds}, lost {losses}/{rounds}");
        println!("I pick {}", MOVES[choice]);
        print!("your move: ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let (response, payoff) = match line.trim().chars().next() {
            Some('r') | Some('R') => (0, VS_ROCK),
            Some('p') | Some('P') => (1, VS_PAPER),
            Some('s') | Some('S') => (2, VS_SCISSORS),
            _ => break,
        };

        rounds += 1;
        if payoff[choice] == 1.0 {
            println!("I won");
            wins += 1;
        } else if payoff[choice] == 0.5 {
            println!("we tied");
            ties += 1;
        } else {
            println!("you won");
            losses += 1;
        }

        // The finished round joins the history, and a fresh network is
        // trained on everything seen so far.
        history.push(inputs.clone(), payoff.to_vec());
        let mut trainer = Trainer::new(Network::new(INPUTS, &[4], 3, -1.0, 1.0), history.clone())
            .expect("history dimensions are fixed");
        trainer.train(&TrainConfig::new(1.0, 2.0, 1000, 0.01, 0.0));
        network = trainer.into_network();

        // Slide the window: the two most recent rounds make up the input.
        for j in (4..INPUTS).rev() {
            inputs[j] = inputs[j - 4];
        }
        inputs[0] = payoff[choice];
        inputs[1] = 0.0;
        inputs[2] = 0.0;
        inputs[3] = 0.0;
        inputs[1 + response] = 1.0;
    }

    match network.save("rps-network.txt") {
        Ok(()) => println!("saved rps-network.txt"),
        Err(e) => eprintln!("couldn't save the network: {e}"),
    }
}
