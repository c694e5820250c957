extern crate tcrl;

use slog::info;
use tcrl::{
    control::{tabular::QLearning, Dyna},
    core::{run, Evaluation, SerialExperiment},
    domains::Corridor,
    logging,
    policies::EpsilonGreedy,
};

fn main() {
    let logger = logging::root(logging::stdout());

    let mut agent = {
        let policy = EpsilonGreedy::seeded(0.1, 0).unwrap();
        let learner = QLearning::new(2, policy, 0.5, 0.95, 0.0).unwrap();

        Dyna::new(learner, 30, 0.9, 0.5, 0).unwrap()
    };

    // Training phase:
    let _training_result = {
        let e = SerialExperiment::new(&mut agent, Box::new(|| Corridor::new(16)), 1000);

        run(e, 20, Some(logger.clone())).unwrap()
    };

    info!(logger, "model"; "entries" => agent.n_model_entries());

    // Testing phase:
    let testing_result = Evaluation::new(&mut agent, Box::new(|| Corridor::new(16)), 1000)
        .next()
        .unwrap()
        .unwrap();

    info!(logger, "solution"; testing_result);
}
