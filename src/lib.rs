extern crate serde;
#[macro_use]
extern crate serde_json;
extern crate derivative;
extern crate itertools;
extern crate more_asserts;
extern crate num_traits;
extern crate petgraph;
extern crate priority_queue;
extern crate rand;
extern crate rand_xoshiro;

pub mod dual_updater;
pub mod edge;
pub mod error;
pub mod example_graphs;
pub mod initializer;
pub mod node;
pub mod options;
pub mod ordered_float;
pub mod primal_updater;
pub mod solver;
pub mod state;
pub mod tree;
pub mod tree_edge;
pub mod util;
