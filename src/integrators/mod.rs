pub mod fixed_step;
