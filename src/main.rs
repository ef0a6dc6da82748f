#![allow(non_snake_case)]
pub mod Examples;
pub mod Utils;
pub mod numerical;
use crate::Examples::quad_examples::quad_examples;

fn main() {
    let example = 0;
    quad_examples(example);
}
