mod company;
mod contact;
mod interaction;
mod lead;
mod profile;
