//! This module contains the interface through which an instrumentation layer
//! reports the instructions executed by the monitored program.
//!
//! Observers are purely presentational. Every callback has a no-op default, so
//! an observer only needs to implement the instruction categories it cares
//! about.

use tracing::info;

use crate::shadow::ShadowValue;

/// A receiver of callbacks for each instruction executed by the monitored
/// program.
///
/// Instructions are identified by `iid`, the static identifier of the
/// instruction assigned at instrumentation time.
#[allow(unused_variables)] // Defaults ignore their arguments
pub trait InstructionObserver {
    /// Gets the name the observer was registered under.
    fn name(&self) -> &str;

    fn store(&mut self, iid: u64, address: &ShadowValue, value: &ShadowValue) {}

    fn add(&mut self, iid: u64, nuw: bool, nsw: bool, op1: &ShadowValue, op2: &ShadowValue) {}

    fn sub(&mut self, iid: u64, nuw: bool, nsw: bool, op1: &ShadowValue, op2: &ShadowValue) {}

    fn alloca(&mut self) {}

    fn call(&mut self) {}

    // Casts

    fn bitcast(&mut self) {}

    fn fpext(&mut self) {}

    fn fptosi(&mut self) {}

    fn fptoui(&mut self) {}

    fn fptrunc(&mut self) {}

    // Memory and comparison

    fn load(&mut self) {}

    fn fcmp(&mut self) {}

    fn icmp(&mut self) {}

    // Vector and aggregate operations

    fn extract_element(&mut self) {}

    fn fence(&mut self) {}

    fn get_element_ptr(&mut self) {}

    fn insert_element(&mut self) {}

    fn insert_value(&mut self) {}

    fn landing_pad(&mut self) {}

    fn phinode(&mut self) {}

    fn select(&mut self) {}

    fn shuffle_vector(&mut self) {}

    // Terminators

    fn branch(&mut self) {}

    fn indirectbr(&mut self) {}

    fn invoke(&mut self) {}

    fn resume(&mut self) {}

    fn return_(&mut self) {}

    fn switch_(&mut self) {}

    fn unreachable(&mut self) {}
}

/// An observer that logs every callback it receives at the `info` level.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrintObserver {
    name: String,
}

impl PrintObserver {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self { name }
    }

    fn announce(&self, tag: &str) {
        info!(observer = %self.name, "<<<<< {tag} >>>>>");
    }
}

/// Renders an arithmetic callback with its wrapping flags and operands.
#[must_use]
pub fn describe_arithmetic(
    tag: &str,
    iid: u64,
    nuw: bool,
    nsw: bool,
    op1: &ShadowValue,
    op2: &ShadowValue,
) -> String {
    format!(
        "<<<<< {tag} >>>>> {iid}, nuw:{}, nsw:{}, {op1}, {op2}",
        u8::from(nuw),
        u8::from(nsw)
    )
}

impl InstructionObserver for PrintObserver {
    fn name(&self) -> &str {
        &self.name
    }

    fn store(&mut self, iid: u64, address: &ShadowValue, value: &ShadowValue) {
        info!(observer = %self.name, "<<<<< STORE >>>>> {iid}, {address}, {value}");
    }

    fn add(&mut self, iid: u64, nuw: bool, nsw: bool, op1: &ShadowValue, op2: &ShadowValue) {
        let message = describe_arithmetic("ADD", iid, nuw, nsw, op1, op2);
        info!(observer = %self.name, "{message}");
    }

    fn sub(&mut self, iid: u64, nuw: bool, nsw: bool, op1: &ShadowValue, op2: &ShadowValue) {
        let message = describe_arithmetic("SUB", iid, nuw, nsw, op1, op2);
        info!(observer = %self.name, "{message}");
    }

    fn alloca(&mut self) {
        self.announce("ALLOCA");
    }

    fn call(&mut self) {
        self.announce("CALL");
    }

    fn bitcast(&mut self) {
        self.announce("BITCAST");
    }

    fn fpext(&mut self) {
        self.announce("FPEXT");
    }

    fn fptosi(&mut self) {
        self.announce("FPTOSI");
    }

    fn fptoui(&mut self) {
        self.announce("FPTOUI");
    }

    fn fptrunc(&mut self) {
        self.announce("FPTRUNC");
    }

    fn load(&mut self) {
        self.announce("LOAD");
    }

    fn fcmp(&mut self) {
        self.announce("FCMP");
    }

    fn icmp(&mut self) {
        self.announce("ICMP");
    }

    fn extract_element(&mut self) {
        self.announce("EXTRACTELEMENT");
    }

    fn fence(&mut self) {
        self.announce("FENCE");
    }

    fn get_element_ptr(&mut self) {
        self.announce("GETELEMENTPTR");
    }

    fn insert_element(&mut self) {
        self.announce("INSERTELEMENT");
    }

    fn insert_value(&mut self) {
        self.announce("INSERTVALUE");
    }

    fn landing_pad(&mut self) {
        self.announce("LANDINGPAD");
    }

    fn phinode(&mut self) {
        self.announce("PHINODE");
    }

    fn select(&mut self) {
        self.announce("SELECT");
    }

    fn shuffle_vector(&mut self) {
        self.announce("SHUFFLEVECTOR");
    }

    fn branch(&mut self) {
        self.announce("BRANCH");
    }

    fn indirectbr(&mut self) {
        self.announce("INDIRECTBR");
    }

    fn invoke(&mut self) {
        self.announce("INVOKE");
    }

    fn resume(&mut self) {
        self.announce("RESUME");
    }

    fn return_(&mut self) {
        self.announce("RETURN");
    }

    fn switch_(&mut self) {
        self.announce("SWITCH");
    }

    fn unreachable(&mut self) {
        self.announce("UNREACHABLE");
    }
}

#[cfg(test)]
mod test {
    use crate::{
        observer::{describe_arithmetic, InstructionObserver, PrintObserver},
        shadow::{Scope, ShadowValue, ValueKind},
    };

    /// Counts the arithmetic callbacks and relies on the defaults for the rest.
    struct Counter {
        arithmetic: usize,
    }

    impl InstructionObserver for Counter {
        fn name(&self) -> &str {
            "counter"
        }

        fn add(&mut self, _: u64, _: bool, _: bool, _: &ShadowValue, _: &ShadowValue) {
            self.arithmetic += 1;
        }

        fn sub(&mut self, _: u64, _: bool, _: bool, _: &ShadowValue, _: &ShadowValue) {
            self.arithmetic += 1;
        }
    }

    fn notify_all(observer: &mut dyn InstructionObserver) {
        let value = ShadowValue::int(Scope::Register, ValueKind::Int32, 3);
        observer.store(1, &value, &value);
        observer.add(2, true, false, &value, &value);
        observer.sub(3, false, true, &value, &value);
        observer.alloca();
        observer.fptrunc();
        observer.load();
        observer.phinode();
        observer.return_();
        observer.unreachable();
    }

    #[test]
    fn unimplemented_callbacks_do_nothing() {
        let mut counter = Counter { arithmetic: 0 };
        notify_all(&mut counter);
        assert_eq!(counter.arithmetic, 2);
    }

    #[test]
    fn print_observer_accepts_every_callback() {
        let mut observer = PrintObserver::new("print");
        notify_all(&mut observer);
        assert_eq!(observer.name(), "print");
    }

    #[test]
    fn describes_arithmetic_with_flags_and_operands() {
        let one = ShadowValue::int(Scope::Register, ValueKind::Int8, 1);
        let two = ShadowValue::int(Scope::Register, ValueKind::Int8, 2);

        let message = describe_arithmetic("ADD", 12, true, false, &one, &two);
        assert!(message.starts_with("<<<<< ADD >>>>> 12, nuw:1, nsw:0, REGISTER => [INT8: 1]"));
        assert!(message.contains(", REGISTER => [INT8: 2]"));
    }
}
