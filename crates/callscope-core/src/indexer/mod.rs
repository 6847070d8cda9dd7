pub mod callgraph;
pub mod facts;
pub mod normalizer;
pub mod pagerank;
pub mod pipeline;
pub mod validator;
