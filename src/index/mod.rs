pub mod primary_key;
