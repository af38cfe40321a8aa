mod common;

use common::{build, run_vm, Cpu, STACK_BASE};
use hackc::{assembler, translator};

#[test]
fn test_add_then_pop_temp() {
    let cpu = run_vm("push constant 7\npush constant 8\nadd\npop temp 0\n", &[]);
    assert_eq!(cpu.ram[5], 15);
    assert_eq!(cpu.sp(), STACK_BASE);
}

#[test]
fn test_eq() {
    let cpu = run_vm("push constant 17\npush constant 17\neq\n", &[]);
    assert_eq!(cpu.top(), -1);
    assert_eq!(cpu.sp(), STACK_BASE + 1);

    let cpu = run_vm("push constant 17\npush constant 16\neq\n", &[]);
    assert_eq!(cpu.top(), 0);
    assert_eq!(cpu.sp(), STACK_BASE + 1);
}

#[test]
fn test_gt_and_lt() {
    let cases = [
        ("push constant 5\npush constant 3\ngt", -1),
        ("push constant 3\npush constant 5\ngt", 0),
        ("push constant 5\npush constant 5\ngt", 0),
        ("push constant 3\npush constant 5\nlt", -1),
        ("push constant 5\npush constant 3\nlt", 0),
        ("push constant 5\npush constant 5\nlt", 0),
        ("push constant 4\nneg\npush constant 2\nlt", -1),
    ];

    for (source, expected) in cases.iter() {
        let cpu = run_vm(source, &[]);
        assert_eq!(cpu.top(), *expected, "{}", source);
    }
}

#[test]
fn test_several_comparisons_in_sequence() {
    // Each comparison branches to absolute addresses, so later ones only
    // work if the instruction count stayed exact through earlier ones.
    let source = "
        push constant 1
        push constant 1
        eq
        push constant 2
        push constant 1
        gt
        and
        push constant 9
        push constant 8
        lt
        or
        pop static 0
        push constant 3
        push constant 4
        eq
        pop static 1
    ";
    let cpu = run_vm(source, &[]);
    assert_eq!(cpu.ram[16], -1);
    assert_eq!(cpu.ram[17], 0);
    assert_eq!(cpu.sp(), STACK_BASE);
}

#[test]
fn test_pop_then_push_local() {
    let cpu = run_vm(
        "push constant 42\npop local 0\npush local 0\n",
        &[(1, 300)],
    );
    assert_eq!(cpu.ram[300], 42);
    assert_eq!(cpu.top(), 42);
    assert_eq!(cpu.sp(), STACK_BASE + 1);
}

#[test]
fn test_indirect_segments() {
    let source = "
        push constant 10
        pop local 2
        push constant 21
        pop argument 1
        push constant 36
        pop this 6
        push constant 42
        pop that 5
        push local 2
        push that 5
        add
        push argument 1
        sub
        push this 6
        add
    ";
    let cpu = run_vm(source, &[(1, 300), (2, 400), (3, 3000), (4, 3010)]);
    assert_eq!(cpu.ram[302], 10);
    assert_eq!(cpu.ram[401], 21);
    assert_eq!(cpu.ram[3006], 36);
    assert_eq!(cpu.ram[3015], 42);
    assert_eq!(cpu.top(), 10 + 42 - 21 + 36);
    assert_eq!(cpu.sp(), STACK_BASE + 1);
}

#[test]
fn test_pointer_and_static() {
    let source = "
        push constant 3030
        pop pointer 0
        push constant 3040
        pop pointer 1
        push constant 32
        pop this 2
        push constant 46
        pop that 6
        push pointer 0
        push pointer 1
        add
        push constant 7
        pop static 3
        push static 3
    ";
    let cpu = run_vm(source, &[]);
    assert_eq!(cpu.ram[3], 3030);
    assert_eq!(cpu.ram[4], 3040);
    assert_eq!(cpu.ram[3032], 32);
    assert_eq!(cpu.ram[3046], 46);
    assert_eq!(cpu.ram[19], 7);
    assert_eq!(cpu.top(), 7);
    assert_eq!(cpu.ram[(cpu.sp() - 2) as usize], 6070);
}

#[test]
fn test_arithmetic_and_logic() {
    let cases = [
        ("push constant 9\npush constant 4\nsub", 5),
        ("push constant 4\npush constant 9\nsub", -5),
        ("push constant 12\nneg", -12),
        ("push constant 12\npush constant 10\nand", 8),
        ("push constant 12\npush constant 10\nor", 14),
        ("push constant 0\nnot", -1),
    ];

    for (source, expected) in cases.iter() {
        let cpu = run_vm(source, &[]);
        assert_eq!(cpu.top(), *expected, "{}", source);
    }
}

#[test]
fn test_stack_depth() {
    let prelude = "push constant 6\npush constant 3\n";
    let cases = [
        ("add", -1), ("sub", -1), ("and", -1), ("or", -1),
        ("eq", -1), ("gt", -1), ("lt", -1),
        ("neg", 0), ("not", 0),
        ("push constant 1", 1), ("push temp 2", 1),
        ("pop temp 2", -1), ("pop static 0", -1),
    ];

    for (command, effect) in cases.iter() {
        let cpu = run_vm(&format!("{}{}\n", prelude, command), &[]);
        assert_eq!(cpu.sp(), STACK_BASE + 2 + effect, "{}", command);
    }
}

#[test]
fn test_translation_is_idempotent() {
    let source = "push constant 1\npush constant 2\nlt\npop local 0\npush static 4\n";
    assert_eq!(translator::translate(source), translator::translate(source));
    assert_eq!(build(source), build(source));
}

#[test]
fn test_assembled_program_with_variables() {
    // Sums 1..=5 into R1 using two variables and a loop.
    let source = "
        @i
        M=1
        @sum
        M=0
    (LOOP)
        @i
        D=M
        @5
        D=D-A
        @STOP
        D;JGT
        @i
        D=M
        @sum
        M=D+M
        @i
        M=M+1
        @LOOP
        0;JMP
    (STOP)
        @sum
        D=M
        @R1
        M=D
    ";

    let words = assembler::assemble(source).unwrap();
    assert_eq!(words[0], 16);
    assert_eq!(words[2], 17);

    let mut cpu = Cpu::new(words);
    cpu.run();
    assert_eq!(cpu.ram[1], 15);
    assert_eq!(cpu.ram[16], 6);
}
