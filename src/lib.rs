pub mod big_int;

pub use big_int::{BigInt, ParseBigIntError, Sign, SigNum};

mod util {
    pub mod rng;
}
