mod common;
mod reconcile;
mod risk;
mod service;
mod simulation;
