pub mod u510_generate_sample_data;
