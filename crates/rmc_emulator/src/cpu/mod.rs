mod calc;
mod executor;
mod operand;
mod state;

use rmc_decoder::decode_instruction;
use rmc_instruction::{Instruction, Segment};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::memory::Memory;

pub use executor::execute;
pub use operand::OperandAccess;
pub use state::{Flags, RegisterFile, RegisterSnapshot};

/// Where execution starts after a reset; the address a boot sector is loaded to.
pub const RESET_IP: u16 = 0x7C00;

/// Number of bytes fetched at `CS:IP` before each decode.
pub const FETCH_WINDOW: usize = rmc_decoder::MAX_INSTRUCTION_LENGTH;

/// How a call to [Cpu::run] ended.
#[derive(Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Number of instructions that completed.
    pub retired: usize,
    /// The error that stopped the run, or `None` if the step limit was reached.
    pub error: Option<Error>,
}

/// An emulated real mode CPU bound to its memory.
pub struct Cpu {
    registers: RegisterFile,
    memory: Memory,
}

impl Cpu {
    pub fn new(memory: Memory) -> Self {
        let mut registers = RegisterFile::default();
        registers.ip = RESET_IP;

        Self { registers, memory }
    }

    pub fn set_reset_vector(&mut self, segment: u16, offset: u16) {
        self.registers.set_segment(Segment::Cs, segment);
        self.registers.ip = offset;
    }

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn dump_state(&self) -> RegisterSnapshot {
        self.registers.snapshot()
    }

    fn fetch(&self) -> Result<Instruction> {
        let cs = self.registers.segment(Segment::Cs);
        let window = self.memory.window(cs, self.registers.ip, FETCH_WINDOW)?;
        Ok(decode_instruction(window)?)
    }

    /// Fetch, decode and execute a single instruction and return it. A failed step leaves `ip`
    /// on the instruction that failed.
    pub fn step(&mut self) -> Result<Instruction> {
        let cs = self.registers.segment(Segment::Cs);
        let ip = self.registers.ip;

        let result = self.fetch().and_then(|instruction| {
            debug!("{:04X}:{:04X}  {}", cs, ip, instruction);
            execute(&instruction, &mut self.registers, &mut self.memory)?;
            Ok(instruction)
        });

        if let Err(ref err) = result {
            warn!("CPU error at {:04X}:{:04X}: {}", cs, ip, err);
        }

        result
    }

    /// Step until an error occurs or `max_steps` instructions have completed.
    pub fn run(&mut self, max_steps: usize) -> RunOutcome {
        for retired in 0..max_steps {
            if let Err(err) = self.step() {
                return RunOutcome {
                    retired,
                    error: Some(err),
                };
            }
        }

        RunOutcome {
            retired: max_steps,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecutionError;
    use rmc_decoder::DecodeError;
    use rmc_instruction::Register;

    fn cpu_with(bytes: &[u8]) -> Cpu {
        let mut memory = Memory::default();
        memory.write(0x0000, RESET_IP, bytes).unwrap();
        Cpu::new(memory)
    }

    #[test]
    fn reset_state() {
        let cpu = Cpu::new(Memory::default());
        let state = cpu.dump_state();

        assert_eq!(RESET_IP, state.ip);
        assert_eq!(Flags::empty(), state.flags);
        for register in Register::ALL {
            assert_eq!(0, cpu.registers().register(register));
        }
        for segment in Segment::ALL {
            assert_eq!(0, cpu.registers().segment(segment));
        }
    }

    #[test]
    fn mov_register_immediate() {
        let mut cpu = cpu_with(&[0xBB, 0x78, 0x00]);
        cpu.step().unwrap();

        let state = cpu.dump_state();
        assert_eq!(0x0078, state.bx);
        assert_eq!(0x7C03, state.ip);
    }

    #[test]
    fn jmp_short() {
        let mut cpu = cpu_with(&[0xEB, 0x3C]);
        cpu.step().unwrap();

        assert_eq!(RESET_IP + 0x3C + 2, cpu.dump_state().ip);
    }

    #[test]
    fn step_returns_the_instruction() {
        let mut cpu = cpu_with(&[0xFA]);
        assert_eq!("cli", cpu.step().unwrap().to_string());
    }

    #[test]
    fn decode_errors_leave_state_alone() {
        let mut cpu = cpu_with(&[0x00, 0x00]);
        let before = cpu.dump_state();

        assert_eq!(
            Err(Error::Decode(DecodeError::UnsupportedOpcode(0x00))),
            cpu.step()
        );
        assert_eq!(before, cpu.dump_state());
    }

    #[test]
    fn fetch_past_the_end_of_memory() {
        let mut cpu = Cpu::new(Memory::new(0x100));

        assert!(matches!(
            cpu.step(),
            Err(Error::Execution(ExecutionError::OutOfBounds { .. }))
        ));
    }

    #[test]
    fn instruction_cut_off_by_the_end_of_memory() {
        let mut memory = Memory::new(0x100);
        memory.write(0, 0xFE, &[0xBB, 0x78]).unwrap();
        let mut cpu = Cpu::new(memory);
        cpu.set_reset_vector(0x0000, 0x00FE);

        assert_eq!(Err(Error::Decode(DecodeError::Truncated)), cpu.step());
        assert_eq!(0x00FE, cpu.dump_state().ip);
    }

    #[test]
    fn invalid_segment_field_fails_execution() {
        // mov <segment 6>, ax
        let mut cpu = cpu_with(&[0x8E, 0xF0]);
        let before = cpu.dump_state();

        assert_eq!(
            Err(Error::Execution(ExecutionError::InvalidRegisterIndex(6))),
            cpu.step()
        );
        assert_eq!(before, cpu.dump_state());
    }

    #[test]
    fn reset_vector_moves_the_fetch() {
        let mut memory = Memory::default();
        memory.write(0x07C0, 0x0010, &[0xFA]).unwrap();
        let mut cpu = Cpu::new(memory);
        cpu.registers_mut().flags = Flags::INTERRUPT;
        cpu.set_reset_vector(0x07C0, 0x0010);

        cpu.step().unwrap();

        let state = cpu.dump_state();
        assert_eq!(0x07C0, state.cs);
        assert_eq!(0x0011, state.ip);
        assert_eq!(Flags::empty(), state.flags);
    }

    #[test]
    fn run_stops_at_the_first_error() {
        // cli; xor ax, ax; <invalid>
        let mut cpu = cpu_with(&[0xFA, 0x33, 0xC0, 0x0F]);

        let outcome = cpu.run(10);
        assert_eq!(2, outcome.retired);
        assert_eq!(
            Some(Error::Decode(DecodeError::UnsupportedOpcode(0x0F))),
            outcome.error
        );
        assert_eq!(RESET_IP + 3, cpu.dump_state().ip);
    }

    #[test]
    fn run_stops_at_the_limit() {
        // jmp $
        let mut cpu = cpu_with(&[0xEB, 0xFE]);

        let outcome = cpu.run(100);
        assert_eq!(
            RunOutcome {
                retired: 100,
                error: None
            },
            outcome
        );
        assert_eq!(RESET_IP, cpu.dump_state().ip);
    }
}
