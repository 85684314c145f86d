pub mod mitie;
