use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tsfront_parser::{parse_source_files, ParseOptions, Parser};

// A medium-size TypeScript source with a spread of declarations and expressions.
const TYPESCRIPT_SOURCE: &str = r#"
// TypeScript interface definitions
interface User {
    id: number;
    name: string;
    email: string;
    age?: number;
    preferences: UserPreferences;
}

interface UserPreferences {
    theme: 'light' | 'dark';
    notifications: boolean;
    language: string;
}

// Type aliases
type UserID = number;
type UserMap = Map<UserID, User>;

// Class definition
class UserService {
    private users: UserMap;
    private nextId: UserID;

    constructor() {
        this.users = new Map();
        this.nextId = 1;
    }

    createUser(name: string, email: string): User {
        const user: User = {
            id: this.nextId++,
            name,
            email,
            preferences: {
                theme: 'light',
                notifications: true,
                language: 'en'
            }
        };
        this.users.set(user.id, user);
        return user;
    }

    getUserById(id: UserID): User | undefined {
        return this.users.get(id);
    }

    updateUser(id: UserID, updates: Partial<User>): boolean {
        const user = this.users.get(id);
        if (!user) return false;
        this.users.set(id, { ...user, ...updates });
        return true;
    }

    deleteUser(id: UserID): boolean {
        return this.users.delete(id);
    }

    getAllUsers(): User[] {
        return Array.from(this.users.values());
    }
}

// Function with generics
function filterUsers<T extends User>(
    users: T[],
    predicate: (user: T) => boolean
): T[] {
    return users.filter(predicate);
}

// Async function
async function fetchUserData(id: UserID): Promise<User | null> {
    const service = new UserService();
    return service.getUserById(id) || null;
}

// Arrow function with type annotations
const processUsers = (users: User[]): number => {
    return users.reduce((count, user) => {
        if (user.age && user.age > 18) {
            return count + 1;
        }
        return count;
    }, 0);
};

// Export statements
export { User, UserService, UserPreferences };
export default UserService;
"#;

const TSX_SOURCE: &str = r#"
const UserList = ({ users, onSelect }: Props) => (
    <ul className="users">
        {users.map(user => (
            <li key={user.id} onClick={() => onSelect(user)}>
                <span data-role="name">{user.name}</span>
                {user.age ? <em>{user.age}</em> : null}
            </li>
        ))}
    </ul>
);
"#;

fn bench_parse_typescript(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(TYPESCRIPT_SOURCE.len() as u64));
    group.bench_function("typescript_medium", |b| {
        b.iter(|| {
            let parser = Parser::new("bench.ts", black_box(TYPESCRIPT_SOURCE), ParseOptions::default());
            black_box(parser.parse_source_file());
        });
    });
    group.bench_function("typescript_medium_tree_only", |b| {
        let options = ParseOptions {
            set_parent_nodes: false,
            collect_jsdoc: false,
            process_reference_directives: false,
            ..ParseOptions::default()
        };
        b.iter(|| {
            let parser = Parser::new("bench.ts", black_box(TYPESCRIPT_SOURCE), options.clone());
            black_box(parser.parse_source_file());
        });
    });
    group.bench_function("tsx_component", |b| {
        b.iter(|| {
            let parser = Parser::new("bench.tsx", black_box(TSX_SOURCE), ParseOptions::default());
            black_box(parser.parse_source_file());
        });
    });
    group.finish();
}

fn bench_parse_batch(c: &mut Criterion) {
    let inputs: Vec<(String, &str)> = (0..64).map(|i| (format!("file{i}.ts"), TYPESCRIPT_SOURCE)).collect();
    c.bench_function("parse_batch_64_files", |b| {
        b.iter(|| black_box(parse_source_files(black_box(&inputs), &ParseOptions::default())));
    });
}

criterion_group!(benches, bench_parse_typescript, bench_parse_batch);
criterion_main!(benches);
