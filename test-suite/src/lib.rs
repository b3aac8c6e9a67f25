#[cfg(test)]
mod common_setup;
#[cfg(test)]
mod sweepstakes;
