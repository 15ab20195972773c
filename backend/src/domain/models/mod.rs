pub mod contribution;
