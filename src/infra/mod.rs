pub mod iggy;
