/*
 * Copyright (c) 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

use rustop::opts;
use time::OffsetDateTime;

use rs_transport::format;
use rs_transport::{total_cost, Initial, Limits, Pricing, SolutionState, SteppingStone};

fn main() {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve a transportation problem with the stepping-stone method.";
        opt method:String=String::from("both"), desc:"Initial heuristic: northwest, vogel or both";
        opt first:bool, desc:"First improvement pricing (default: best improvement)";
        param file:String, desc:"Instance file name";
    }
    .parse_or_exit();

    let methods: Vec<Initial> = if args.method == "both" {
        Initial::all().to_vec()
    } else {
        match args.method.parse() {
            Ok(m) => vec![m],
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        }
    };

    let tstart = OffsetDateTime::now_utc();
    let problem = match format::read_from_file::<f64>(&args.file) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.file, e);
            std::process::exit(1);
        }
    };
    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("  number of supplies: {}", problem.num_supplies());
    println!("  number of demands: {}", problem.num_demands());

    let limits = Limits::for_size(problem.num_supplies().max(problem.num_demands()));

    for method in methods {
        println!("Initial solution: {}", method);
        let tstart = OffsetDateTime::now_utc();
        let init = method.build(&problem, None);
        let tend = OffsetDateTime::now_utc();
        println!("  time: {}", (tend - tstart).as_seconds_f64());
        if init.degraded {
            println!("  (degraded)");
        }
        match total_cost(&problem.costs, &init.allocation) {
            Ok(v) => println!("  value: {}", v),
            Err(e) => println!("  error: {}", e),
        }

        let mut spx = SteppingStone::new(&problem.costs).with_limits(&limits);
        if args.first {
            spx.pricing = Pricing::First;
        }
        let tstart = OffsetDateTime::now_utc();
        let result = spx.solve(&problem.supplies, &problem.demands, init.allocation);
        let tend = OffsetDateTime::now_utc();
        println!("Stepping-stone");
        println!("  time: {}", (tend - tstart).as_seconds_f64());
        match result {
            Ok(SolutionState::Optimal) => println!("  state: optimal"),
            Ok(state) => println!("  state: {:?} ({:?})", state, spx.abort_reason()),
            Err(e) => {
                println!("  error: {}", e);
                continue;
            }
        }
        println!("  iterations: {}", spx.num_iterations());
        println!("  value: {}", spx.value());
    }
}
