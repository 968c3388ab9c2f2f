mod prime;

pub use prime::find_prime_at_least;
