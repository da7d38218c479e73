pub mod explainer;
