use crate::cpu::Flags;

/// Sets ZF, SF and PF from a result. Parity only looks at the low byte of the result, like the
/// hardware does.
pub fn flags_from_value(value: u16, flags: &mut Flags) {
    flags.set(Flags::ZERO, value == 0);
    flags.set(Flags::SIGN, value & 0x8000 != 0);
    flags.set(Flags::PARITY, (value as u8).count_ones() % 2 == 0);
}

pub fn xor(dst: u16, src: u16, flags: &mut Flags) -> u16 {
    let result = dst ^ src;

    flags.set(Flags::CARRY, false);
    flags.set(Flags::OVERFLOW, false);
    flags_from_value(result, flags);

    result
}
