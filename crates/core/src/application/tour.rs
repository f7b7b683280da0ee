//! Typed feature tour
//!
//! Small, self-contained building blocks printed by the `fanout` binary
//! before the broadcast runs: ordinal constants, composed structs behind a
//! trait, a generic minimum, a custom error, a guarded fault, explicit type
//! tags and a random pair.

use crate::application::worker::{execute_guarded_quiet, PanicGuardResult};
use crate::domain::ApplicationError;
use rand::Rng;
use std::fmt;

/// Message carried by the forced fault
pub const FORCED_FAULT_MESSAGE: &str = "This is a forced panic!";

/// Sequential ordinals starting at zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Ordinal {
    First = 0,
    Second = 1,
    Third = 2,
}

impl Ordinal {
    pub const ALL: [Ordinal; 3] = [Ordinal::First, Ordinal::Second, Ordinal::Third];

    pub fn value(self) -> u8 {
        self as u8
    }
}

/// Explicit configuration handed to the tour instead of a global
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourConfig {
    pub greeting_banner: String,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            greeting_banner: "I am an explicitly passed configuration value.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Embedded {
    pub description: String,
}

/// Person composed with an `Embedded` value (plain field, no forwarding)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub embedded: Embedded,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u32, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            embedded: Embedded {
                description: description.into(),
            },
        }
    }

    pub fn have_birthday(&mut self) {
        self.age += 1;
    }
}

pub trait Greeter {
    fn greet(&self) -> String;
}

impl Greeter for Person {
    fn greet(&self) -> String {
        format!(
            "Hello, my name is {}. I am {} years old.",
            self.name, self.age
        )
    }
}

/// Smaller of two values; `b` wins ties
pub fn min<T: PartialOrd>(a: T, b: T) -> T {
    if a < b {
        a
    } else {
        b
    }
}

/// Produce the illustrative application error on request
pub fn cause_error(should_error: bool) -> Result<(), ApplicationError> {
    if should_error {
        return Err(ApplicationError::new(500, "Something went wrong!"));
    }
    Ok(())
}

/// Abort the current scope abnormally
pub fn force_fault() {
    panic!("{}", FORCED_FAULT_MESSAGE);
}

/// Run `force_fault` inside a silent guarded scope and return the recovered message
pub fn recover_forced_fault() -> Option<String> {
    match execute_guarded_quiet(force_fault) {
        PanicGuardResult::Success(()) => None,
        PanicGuardResult::Panicked(msg) => Some(msg),
    }
}

/// Explicit runtime type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Int,
    Float,
    Text,
    Person,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Text => "string",
            TypeTag::Person => "Person",
        };
        f.write_str(name)
    }
}

/// Values that can report their type tag
pub trait Describe {
    fn type_tag(&self) -> TypeTag;
}

impl Describe for i64 {
    fn type_tag(&self) -> TypeTag {
        TypeTag::Int
    }
}

impl Describe for f64 {
    fn type_tag(&self) -> TypeTag {
        TypeTag::Float
    }
}

impl Describe for &str {
    fn type_tag(&self) -> TypeTag {
        TypeTag::Text
    }
}

impl Describe for String {
    fn type_tag(&self) -> TypeTag {
        TypeTag::Text
    }
}

impl Describe for Person {
    fn type_tag(&self) -> TypeTag {
        TypeTag::Person
    }
}

pub fn describe_type(value: &dyn Describe) -> String {
    format!("Type is: {}", value.type_tag())
}

/// Two integers in `0..100`
pub fn random_pair<R: Rng + ?Sized>(rng: &mut R) -> (u32, u32) {
    (rng.gen_range(0..100), rng.gen_range(0..100))
}

pub fn describe_choice(choice: i32) -> &'static str {
    match choice {
        1 => "Choice is 1",
        2 => "Choice is 2",
        _ => "Choice is something else",
    }
}
