// Integration tests module

#[cfg(test)]
mod bus_test;



#[cfg(test)]
mod scheduler_test;
