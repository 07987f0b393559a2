pub mod carbon_intensity;
