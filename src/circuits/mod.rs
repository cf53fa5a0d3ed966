// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! operations (`qteleport::operations::Operation`).
//!
//! A [`Circuit`] owns a fixed number of qubit slots, a list of named one-bit
//! classical registers and the ordered operations acting on them. Every
//! operation is validated as it is appended, so a circuit that exists is
//! well-ordered: no guard reads a bit before a measurement writes it, and no
//! bit is written twice in a shot.

use crate::core::{ClbitId, QubitId, TeleportError, TeleportResult};
use crate::operations::{Gate, Operation};
use std::collections::HashSet;
use std::fmt;
use tracing::trace;

/// An ordered sequence of operations over a fixed qubit register and a set of
/// named classical bits.
///
/// Analogy: similar to `qiskit.QuantumCircuit` restricted to one-bit
/// classical registers.
#[derive(Clone, PartialEq)] // PartialEq is how structural identity is checked
pub struct Circuit {
    num_qubits: u32,
    /// Register names; the position is the `ClbitId`.
    registers: Vec<String>,
    /// The order is semantically significant.
    operations: Vec<Operation>,
    /// Classical bits written by a measurement so far.
    written: HashSet<ClbitId>,
}

impl Circuit {
    /// Creates an empty circuit over `num_qubits` qubit slots and no classical bits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            registers: Vec::new(),
            operations: Vec::new(),
            written: HashSet::new(),
        }
    }

    /// Declares a one-bit classical register and returns its id.
    ///
    /// # Errors
    /// `DuplicateRegister` if `name` is already declared.
    pub fn add_register(&mut self, name: impl Into<String>) -> TeleportResult<ClbitId> {
        let name = name.into();
        if self.registers.contains(&name) {
            return Err(TeleportError::DuplicateRegister { name });
        }
        let id = ClbitId(self.registers.len() as u32);
        self.registers.push(name);
        Ok(id)
    }

    /// Appends a single operation after validating it against the operations
    /// already present.
    ///
    /// # Errors
    /// * `QubitOutOfRange` for a qubit outside the register.
    /// * `DuplicateQubit` when a controlled gate targets its own control.
    /// * `UnknownClbit` for an undeclared classical bit.
    /// * `ClbitRewritten` when a measurement targets an already-written bit.
    /// * `UnmeasuredCondition` when a guard reads a bit not yet written.
    pub fn add_operation(&mut self, op: Operation) -> TeleportResult<()> {
        for qubit in op.involved_qubits() {
            self.check_qubit(qubit)?;
        }
        if let Operation::Gate(gate) | Operation::Conditional { gate, .. } = &op {
            Self::check_distinct(gate)?;
        }
        if let Some(clbit) = op.read_clbit() {
            self.check_clbit(clbit)?;
            if !self.written.contains(&clbit) {
                return Err(TeleportError::UnmeasuredCondition { clbit });
            }
        }
        if let Some(clbit) = op.written_clbit() {
            self.check_clbit(clbit)?;
            if !self.written.insert(clbit) {
                return Err(TeleportError::ClbitRewritten { clbit });
            }
        }
        trace!("appending operation #{}: {}", self.operations.len(), op);
        self.operations.push(op);
        Ok(())
    }

    /// Appends operations from an iterator, stopping at the first invalid one.
    pub fn add_operations<I>(&mut self, ops: I) -> TeleportResult<()>
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op)?;
        }
        Ok(())
    }

    fn check_qubit(&self, qubit: QubitId) -> TeleportResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(TeleportError::QubitOutOfRange { qubit, num_qubits: self.num_qubits });
        }
        Ok(())
    }

    fn check_clbit(&self, clbit: ClbitId) -> TeleportResult<()> {
        if clbit.index() >= self.registers.len() {
            return Err(TeleportError::UnknownClbit { clbit });
        }
        Ok(())
    }

    fn check_distinct(gate: &Gate) -> TeleportResult<()> {
        if let Gate::ControlledNot { control, target } = gate {
            if control == target {
                return Err(TeleportError::DuplicateQubit { qubit: *control });
            }
        }
        Ok(())
    }

    /// Number of qubit slots.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of classical bits, which is also the width of every outcome key.
    pub fn num_clbits(&self) -> usize {
        self.registers.len()
    }

    /// Declared register names in `ClbitId` order.
    pub fn registers(&self) -> &[String] {
        &self.registers
    }

    /// Name of the register holding `clbit`.
    pub fn register_name(&self, clbit: ClbitId) -> Option<&str> {
        self.registers.get(clbit.index()).map(String::as_str)
    }

    /// Looks up a classical bit by register name.
    pub fn clbit(&self, name: &str) -> Option<ClbitId> {
        self.registers.iter().position(|r| r == name).map(|i| ClbitId(i as u32))
    }

    /// The ordered operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Total number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Builds a [`Circuit`] with method chaining; validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct CircuitBuilder {
    num_qubits: u32,
    registers: Vec<String>,
    operations: Vec<Operation>,
}

impl CircuitBuilder {
    /// Creates a builder for a circuit over `num_qubits` qubit slots.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            registers: Vec::new(),
            operations: Vec::new(),
        }
    }

    /// Declares a one-bit classical register. Ids follow declaration order.
    pub fn add_register(mut self, name: impl Into<String>) -> Self {
        self.registers.push(name.into());
        self
    }

    /// Adds a single operation.
    pub fn add_op(mut self, op: impl Into<Operation>) -> Self {
        self.operations.push(op.into());
        self
    }

    /// Adds multiple operations from an iterator.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(ops);
        self
    }

    /// Validates every register and operation in order and returns the circuit.
    pub fn build(self) -> TeleportResult<Circuit> {
        let mut circuit = Circuit::new(self.num_qubits);
        for name in self.registers {
            circuit.add_register(name)?;
        }
        circuit.add_operations(self.operations)?;
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "Circuit[0 operations on {} qubits]", self.num_qubits);
        }

        let ops = &self.operations;
        let num_ops = ops.len();
        let num_rows = self.num_qubits as usize;
        let num_cregs = self.registers.len();

        let qubit_labels: Vec<String> = (0..self.num_qubits).map(|q| QubitId(q).to_string()).collect();
        let label_width = qubit_labels
            .iter()
            .chain(self.registers.iter())
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        let label_padding = " ".repeat(label_width + 2);

        const GATE_WIDTH: usize = 11;
        const H_WIRE: char = '─';
        const C_WIRE: char = '═';
        const V_WIRE: char = '│';
        const BARRIER: &str = "░";

        fn format_cell(symbol: &str, fill: char) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total = GATE_WIDTH - slen;
                let pre = total / 2;
                let post = total - pre;
                format!("{}{}{}", fill.to_string().repeat(pre), symbol, fill.to_string().repeat(post))
            }
        }

        let q_wire = H_WIRE.to_string().repeat(GATE_WIDTH);
        let c_wire = C_WIRE.to_string().repeat(GATE_WIDTH);
        let mut op_grid: Vec<Vec<String>> = vec![vec![q_wire; num_ops]; num_rows];
        let mut c_grid: Vec<Vec<String>> = vec![vec![c_wire; num_ops]; num_cregs];
        // Rows are qubits then registers; v_connect[row][time] is drawn below `row`
        let total_rows = num_rows + num_cregs;
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; total_rows];

        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Gate(Gate::ControlledNot { control, target }) => {
                    let (r_ctrl, r_tgt) = (control.index(), target.index());
                    op_grid[r_ctrl][t] = format_cell("●", H_WIRE);
                    op_grid[r_tgt][t] = format_cell("X", H_WIRE);
                    let (r_min, r_max) = (r_ctrl.min(r_tgt), r_ctrl.max(r_tgt));
                    for row in v_connect.iter_mut().take(r_max).skip(r_min) {
                        row[t] = V_WIRE;
                    }
                }
                Operation::Gate(gate) => {
                    op_grid[gate.qubits()[0].index()][t] = format_cell(&gate.symbol(), H_WIRE);
                }
                Operation::Measure { qubit, clbit } => {
                    op_grid[qubit.index()][t] = format_cell("M", H_WIRE);
                    c_grid[clbit.index()][t] = format_cell("╩", C_WIRE);
                }
                Operation::Conditional { condition, gate } => {
                    let r_tgt = gate.qubits()[0].index();
                    op_grid[r_tgt][t] = format_cell(&gate.symbol(), H_WIRE);
                    let guard = format!("={}", u8::from(condition.value));
                    c_grid[condition.clbit.index()][t] = format_cell(&guard, C_WIRE);
                    // Join the gated qubit to its guard bit
                    let r_guard = num_rows + condition.clbit.index();
                    for row in v_connect.iter_mut().take(r_guard).skip(r_tgt) {
                        row[t] = V_WIRE;
                    }
                }
                Operation::Barrier { qubits } => {
                    let rows: Vec<usize> = if qubits.is_empty() {
                        (0..num_rows).collect()
                    } else {
                        qubits.iter().map(|q| q.index()).collect()
                    };
                    for r in rows {
                        op_grid[r][t] = format_cell(BARRIER, H_WIRE);
                    }
                }
            }
        }

        writeln!(
            f,
            "Circuit[{} operations on {} qubits, {} classical bits]",
            num_ops, num_rows, num_cregs
        )?;
        for r in 0..total_rows {
            let (label, cells) = if r < num_rows {
                (format!("{}: ", qubit_labels[r]), op_grid[r].join(""))
            } else {
                (format!("{}: ", self.registers[r - num_rows]), c_grid[r - num_rows].join(""))
            };
            write!(f, "{:<width$}", label, width = label_width + 2)?;
            writeln!(f, "{}", cells)?;

            if r + 1 == total_rows {
                break;
            }
            // Spacer rows between qubits always; elsewhere only when a wire crosses
            let crossing = v_connect[r].iter().any(|&c| c != ' ');
            if r + 1 < num_rows || crossing {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let pad = GATE_WIDTH - 1;
                    let pre = pad / 2;
                    write!(f, "{}{}{}", " ".repeat(pre), v_connect[r][t], " ".repeat(pad - pre))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
