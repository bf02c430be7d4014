macro_rules! pop {
	($machine:expr) => {
		match $machine.stack.pop() {
			Ok(value) => value,
			Err(e) => return Control::Exit(e.into()),
		}
	};
}

macro_rules! pop2 {
	($machine:expr) => {
		match $machine.stack.pop2() {
			Ok(pair) => pair,
			Err(e) => return Control::Exit(e.into()),
		}
	};
}

macro_rules! push {
	($machine:expr, $value:expr) => {
		match $machine.stack.push($value) {
			Ok(()) => (),
			Err(e) => return Control::Exit(e.into()),
		}
	};
}

macro_rules! try_or_fail {
	($e:expr) => {
		match $e {
			Ok(value) => value,
			Err(e) => return Control::Exit(e.into()),
		}
	};
}

macro_rules! as_usize_or_fail {
	($value:expr) => {{
		let value = $value;
		if value > U256::from(usize::MAX) {
			return Control::Exit(ExitException::NotSupported.into());
		}
		value.as_usize()
	}};
}

macro_rules! checked_end {
	($offset:expr, $len:expr) => {
		match $offset.checked_add($len) {
			Some(end) => end,
			None => return Control::Exit(ExitException::NotSupported.into()),
		}
	};
}

macro_rules! op1_fn {
	($machine:expr, $f:path) => {{
		let x = pop!($machine);
		push!($machine, $f(x));
		Control::Continue(1)
	}};
}

macro_rules! op2_fn {
	($machine:expr, $f:path) => {{
		let (x, y) = pop2!($machine);
		push!($machine, $f(x, y));
		Control::Continue(1)
	}};
}

macro_rules! op2_wrapping {
	($machine:expr, $op:ident) => {{
		let (x, y) = pop2!($machine);
		push!($machine, x.$op(y).0);
		Control::Continue(1)
	}};
}

macro_rules! op2_bit {
	($machine:expr, $op:ident) => {{
		let (x, y) = pop2!($machine);
		push!($machine, x.$op(y));
		Control::Continue(1)
	}};
}

macro_rules! op2_bool {
	($machine:expr, $op:ident) => {{
		let (x, y) = pop2!($machine);
		push!(
			$machine,
			if x.$op(&y) { U256::one() } else { U256::zero() }
		);
		Control::Continue(1)
	}};
}
