mod cli_test;
mod common;
mod gateway_test;
