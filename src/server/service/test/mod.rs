mod lead;
mod profile;
