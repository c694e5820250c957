extern crate tcrl;

use slog::info;
use tcrl::{
    control::gd::SarsaLambda,
    core::{run, Evaluation, SerialExperiment},
    domains::{Domain, MountainCar},
    fa::{HashedTileCoding, LinearQ},
    logging,
    policies::EpsilonGreedy,
};

fn main() {
    let logger = logging::root(logging::stdout());

    let mut agent = {
        let projection = HashedTileCoding::new(
            MountainCar::dimensions(8).unwrap(),
            8,
            4096,
            0,
        )
        .unwrap();
        let q_func = LinearQ::new(projection, MountainCar::default().n_actions()).unwrap();
        let policy = EpsilonGreedy::seeded(0.1, 0).unwrap();

        SarsaLambda::new(q_func, policy, 0.5, 1.0, 0.9).unwrap()
    };

    // Training phase:
    let _training_result = {
        let e = SerialExperiment::new(&mut agent, Box::new(MountainCar::default), 5000);

        run(e, 200, Some(logger.clone())).unwrap()
    };

    // Testing phase:
    let testing_result = Evaluation::new(&mut agent, Box::new(MountainCar::default), 5000)
        .next()
        .unwrap()
        .unwrap();

    info!(logger, "solution"; testing_result);
}
