mod appending;
mod scanning;
