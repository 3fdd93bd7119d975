pub mod tastecast_env;
