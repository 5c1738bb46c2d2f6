use log::{info, warn};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::time;

use rbidx::{RbTree, NOT_FOUND};

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "inserts", default_value = "0")]
    inserts: usize,

    #[structopt(long = "removes", default_value = "0")]
    removes: usize,

    #[structopt(long = "gets", default_value = "0")]
    gets: usize,

    #[structopt(long = "validate")]
    validate: bool,

    #[structopt(long = "verbose")]
    verbose: bool,
}

fn main() {
    let opts = Opt::from_args();

    let level = if opts.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).ok();

    let seed = opts.seed.unwrap_or_else(random);
    info!("perf seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut index = RbTree::with_capacity(opts.loads);

    // initial load
    let start = time::Instant::now();
    for _i in 0..opts.loads {
        let (key, val): (i32, i32) = (rng.gen(), rng.gen());
        index.insert(key, val);
    }
    info!(
        "loaded {} items in {:?}, len:{} height:{}",
        opts.loads,
        start.elapsed(),
        index.len(),
        index.height()
    );
    if opts.validate {
        validate(&index, "initial load", false);
    }

    do_incremental(&mut rng, &opts, &mut index);
}

fn do_incremental(rng: &mut SmallRng, opts: &Opt, index: &mut RbTree) {
    let start = time::Instant::now();
    let total = opts.inserts + opts.removes + opts.gets;
    let (mut n, mut misses) = (total, 0);
    while n > 0 {
        let op = rng.gen::<usize>() % total;

        let key = rng.gen::<i32>();
        if op < opts.inserts {
            index.insert(key, rng.gen::<i32>());
        } else if op < (opts.inserts + opts.removes) {
            if index.remove(key) == NOT_FOUND {
                misses += 1;
            }
        } else if index.get(key) == NOT_FOUND {
            misses += 1;
        }
        n -= 1;
    }
    info!(
        "incremental for operations {}, misses {}, took {:?}, len:{} height:{}",
        total,
        misses,
        start.elapsed(),
        index.len(),
        index.height()
    );

    if opts.validate {
        validate(index, "incremental", opts.removes > 0);
    }
}

fn validate(index: &RbTree, stage: &str, removed: bool) {
    let res = if removed {
        index.validate_order()
    } else {
        index.validate()
    };
    match res {
        Ok(()) => info!("{} validated", stage),
        Err(err) => warn!("{} validation failed: {}", stage, err),
    }
}
